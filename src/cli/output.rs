//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::{Identity, Role};
use crate::guard::{Access, Decision, RouteDef};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Patient => Color::Blue,
        Role::Researcher => Color::Green,
    }
}

/// Describe who may open a route
pub fn format_access(access: Access) -> String {
    match access {
        Access::Root => "redirect to home".to_string(),
        Access::Guest => "signed out only".to_string(),
        Access::Protected(None) => "any role".to_string(),
        Access::Protected(Some(role)) => role.to_string(),
    }
}

/// Print the route table
pub fn print_route_table(routes: &[RouteDef]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Path").fg(Color::Cyan),
            Cell::new("Access").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
        ]);

    for route in routes {
        let access = match route.access {
            Access::Protected(Some(role)) => Cell::new(format_access(route.access)).fg(role_color(role)),
            _ => Cell::new(format_access(route.access)),
        };
        table.add_row(vec![Cell::new(route.path), access, Cell::new(route.title)]);
    }

    println!("{table}");
}

/// Print the signed-in identity
pub fn print_identity(identity: &Identity, signed_in_at: Option<chrono::DateTime<chrono::Utc>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![Cell::new("Name").fg(Color::Cyan), Cell::new(&identity.name)]);
    table.add_row(vec![Cell::new("Email").fg(Color::Cyan), Cell::new(&identity.email)]);
    table.add_row(vec![
        Cell::new("Role").fg(Color::Cyan),
        Cell::new(identity.role).fg(role_color(identity.role)),
    ]);
    table.add_row(vec![Cell::new("Home").fg(Color::Cyan), Cell::new(identity.home_path())]);
    if let Some(at) = signed_in_at {
        table.add_row(vec![
            Cell::new("Loaded").fg(Color::Cyan),
            Cell::new(at.format("%Y-%m-%d %H:%M:%S UTC")),
        ]);
    }

    println!("{table}");
}

/// Print a guard decision
pub fn print_decision(path: &str, decision: &Decision) {
    match decision {
        Decision::Allow(route) => {
            println!("{} {} ({})", "allow".green().bold(), path, route.title);
        }
        Decision::Redirect(target) => {
            println!("{} {} -> {}", "redirect".yellow().bold(), path, target.path().cyan());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_access() {
        assert_eq!(format_access(Access::Protected(Some(Role::Patient))), "patient");
        assert_eq!(format_access(Access::Protected(None)), "any role");
        assert_eq!(format_access(Access::Guest), "signed out only");
    }
}
