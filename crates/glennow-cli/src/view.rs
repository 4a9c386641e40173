// Terminal rendering of the list and detail views

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use glennow_core::{Banner, Project, ProjectTag};

/// Renders a tag badge, or an empty string when untagged.
fn badge(tag: ProjectTag) -> String {
    match tag {
        ProjectTag::Untagged => String::new(),
        ProjectTag::New => format!("[{}] ", "NEW".white().on_blue().bold()),
        ProjectTag::Inactive => format!("[{}] ", "Inactive".yellow()),
    }
}

/// Parses `#rrggbb` or `#rgb`. Anything else leaves the banner uncolored.
fn hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let (r, g, b) = (channel(&hex[0..1])?, channel(&hex[1..2])?, channel(&hex[2..3])?);
            Some((r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Home screen: banner (when set), heading, then one entry per project.
pub fn render_list(banner: &Banner, projects: &[Project]) -> String {
    let mut out = String::new();

    if banner.is_visible() {
        let text = format!(" {} ", banner.text).bold();
        let text = match hex_color(&banner.color) {
            Some((r, g, b)) => text.on_truecolor(r, g, b),
            None => text,
        };
        out.push_str(&format!("{}{}\n\n", "▌".bold(), text));
    }

    out.push_str(&format!("{}\n", "GlenNOW".bold()));
    out.push_str("Explore projects curated for you\n\n");

    if projects.is_empty() {
        out.push_str(&format!("{}\n", "No projects yet.".dimmed()));
        return out;
    }

    for project in projects {
        let title = if project.inactive {
            project.title.dimmed().to_string()
        } else {
            project.title.bold().to_string()
        };
        out.push_str(&format!("{}{}  {}\n", badge(project.tag), title, project.id.dimmed()));

        let description = if project.description.is_empty() {
            "No description provided."
        } else {
            project.description.as_str()
        };
        out.push_str(&format!("    {}\n", description));

        let contact = if project.contact_email.is_empty() {
            "No contact"
        } else {
            project.contact_email.as_str()
        };
        out.push_str(&format!("    {}\n", contact.dimmed()));
    }

    out
}

/// Detail screen for a single project.
pub fn render_detail(project: &Project) -> String {
    let mut out = String::new();

    let verified = if project.verified {
        format!(" {}", "✓".green().bold())
    } else {
        String::new()
    };
    out.push_str(&format!(
        "{}{}{}\n",
        badge(project.tag),
        project.title.bold(),
        verified
    ));
    out.push_str(&format!("  Id: {}\n\n", project.id));

    if project.description.is_empty() {
        out.push_str("No description provided.\n\n");
    } else {
        out.push_str(&format!("{}\n\n", project.description));
    }

    if !project.images.is_empty() {
        out.push_str("Images\n");
        for image in &project.images {
            out.push_str(&format!("  {}\n", image));
        }
        out.push('\n');
    }

    out.push_str("Sources\n");
    if project.sources.is_empty() {
        out.push_str(&format!("  {}\n", "No sources".dimmed()));
    } else {
        for (i, source) in project.sources.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i, source.underline()));
        }
    }
    out.push('\n');

    out.push_str("Contact\n");
    if project.contact_email.is_empty() {
        out.push_str("  No contact provided\n\n");
    } else {
        out.push_str(&format!("  {}\n\n", project.contact_email));
    }

    out.push_str(&format!("  ■ Created      {}\n", local_time(&project.created_at)));
    out.push_str("  │\n");
    out.push_str(&format!("  ■ Last edited  {}\n", local_time(&project.updated_at)));

    if project.inactive {
        out.push_str(&format!("\n{}\n", "This project is inactive.".bold()));
    }

    out
}
