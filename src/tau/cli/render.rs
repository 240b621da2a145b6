use colored::Colorize;
use tau::commands::{CmdMessage, CmdResult, MessageLevel, NetworkEntry};
use tau::model::Profile;
use unicode_width::UnicodeWidthStr;

const DEFAULT_MARKER: &str = "*";
const CURRENT_MARKER: &str = "→";

pub(super) fn print_result(result: &CmdResult) {
    if !result.listed_profiles.is_empty() {
        print!("{}", render_profiles(&result.listed_profiles));
    }
    if !result.listed_networks.is_empty() {
        print!("{}", render_networks(&result.listed_networks));
    }
    print_messages(&result.messages);
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn network_column(profile: &Profile) -> String {
    match profile.network_type {
        Some(network_type) if !profile.network.is_empty() => {
            format!("{} ({})", profile.network, network_type)
        }
        _ => "-".to_string(),
    }
}

/// One line per profile, columns aligned on display width.
pub(super) fn render_profiles(profiles: &[Profile]) -> String {
    let name_width = profiles.iter().map(|p| p.name.width()).max().unwrap_or(0);
    let provider_width = profiles.iter().map(|p| p.provider.width()).max().unwrap_or(0);

    let mut output = String::new();
    for profile in profiles {
        let marker = if profile.default { DEFAULT_MARKER } else { " " };
        let name = pad(&profile.name, name_width);
        let name = if profile.default {
            name.bold().to_string()
        } else {
            name
        };
        output.push_str(&format!(
            "{} {}  {}  {}\n",
            marker.yellow(),
            name,
            pad(&profile.provider, provider_width).dimmed(),
            network_column(profile)
        ));
    }
    output
}

pub(super) fn render_networks(networks: &[NetworkEntry]) -> String {
    let mut output = String::new();
    for entry in networks {
        if entry.is_current {
            output.push_str(&format!("{} {}\n", CURRENT_MARKER.green(), entry.value.green()));
        } else {
            output.push_str(&format!("  {}\n", entry.value));
        }
    }
    output
}
