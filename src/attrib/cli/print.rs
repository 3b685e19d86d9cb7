use attrib::api::{CmdMessage, MessageLevel, ShownAttribute};
use attrib::config::AttribConfig;
use attrib::error::Result;
use colored::Colorize;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_shown(shown: &[ShownAttribute]) {
    for (i, attr) in shown.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", attr.kind.to_string().yellow(), attr.id.bold());
        println!("  {}", attr.rendering.dimmed());
        for (key, value) in &attr.mappings {
            println!("  {}: {}", key, value);
        }
    }
}

pub(super) fn print_shown_json(shown: &[ShownAttribute], pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(shown)?
    } else {
        serde_json::to_string(shown)?
    };
    println!("{}", json);
    Ok(())
}

pub(super) fn print_config(config: &AttribConfig) {
    for (key, value) in config.entries() {
        println!("{} = {}", key, value);
    }
}
