//! Pretty terminal output with colors and badges.

use colored::Colorize;

// === Startup ===

pub fn print_banner() {
    println!();
    println!("{}", "╔═══════════════════════════════════════════════════════════╗".cyan());
    println!("{}", "║                                                           ║".cyan());
    println!("║       {}       ║", "📡 pagebeacon v0.1.0".bold().white());
    println!("║       {}       ║", "Server-rendered pages, monitored loads".dimmed());
    println!("{}", "║                                                           ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════════════════════╝".cyan());
    println!();
}

pub fn print_startup(addr: &str) {
    println!("{} {}", "✓".green().bold(), "Server ready".white().bold());
    println!("  {} {}", "→".dimmed(), format!("http://{}", addr).cyan().underline());
    println!();
    println!("{}", "Endpoints:".white().bold());
    println!("  {} {}          {}", "GET ".green(), "/".white(), "Rendered home page".dimmed());
    println!("  {} {}     {}", "GET ".green(), "/:page".white(), "Other registered pages".dimmed());
    println!("  {} {} {}", "GET ".green(), "/api/users".white(), "User directory".dimmed());
    println!("  {} {}   {}", "GET ".green(), "/metrics".white(), "Telemetry".dimmed());
    println!("  {} {}    {}", "GET ".green(), "/health".white(), "Health check".dimmed());
    println!();
}

// === Badges ===

fn badge(text: &str, fg: colored::Color, bg: colored::Color) -> colored::ColoredString {
    format!(" {} ", text).color(fg).on_color(bg).bold()
}

// === Core Events ===

pub fn log_render(pathname: &str) {
    println!(
        "{} {} {}",
        badge("PAGE", colored::Color::Black, colored::Color::Green),
        "path:".dimmed(),
        pathname.white()
    );
}

pub fn log_agent_connected(app: &str) {
    println!(
        "{} {} {} {}",
        badge("RUM", colored::Color::Black, colored::Color::Blue),
        "app:".dimmed(),
        app.white(),
        "✓ collector connected".green()
    );
}

pub fn log_method_rejected(method: &str, path: &str) {
    println!(
        "{} {} {} {}",
        badge("DENY", colored::Color::White, colored::Color::Red),
        method.yellow(),
        path.white(),
        "method not allowed".red()
    );
}
