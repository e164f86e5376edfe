use std::{env, env::VarError};

/// The server takes no arguments. Any argument prints the help text and the current configuration instead.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Secrets (MTR_FOOTBALL_API_KEY, MTR_TASK_QUEUE_TOKEN) are not listed
    const DISPLAY_ENVS: [&str; 14] = [
        "RUST_LOG",
        "MTR_HOST",
        "MTR_PORT",
        "MTR_DATABASE_URL",
        "MTR_FIRST_CHECK_DELAY",
        "MTR_RECHECK_INTERVAL",
        "MTR_USE_X_FORWARDED_FOR",
        "MTR_PUBLIC_URL",
        "MTR_FOOTBALL_API_URL",
        "MTR_FOOTBALL_LEAGUE",
        "MTR_FOOTBALL_SEASON",
        "MTR_TASK_QUEUE_URL",
        "MTR_TASK_QUEUE_NAME",
        "MTR_WEBHOOK_TIMEOUT",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
