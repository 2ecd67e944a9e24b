use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli_args::Cli;

/// Run `docugen completion <shell>`: print a completion script for `shell`.
pub fn run(shell: &str) -> i32 {
    let name = match shell.to_ascii_lowercase().as_str() {
        "ps" | "pwsh" => "powershell".to_string(),
        other => other.to_string(),
    };
    let Ok(target) = name.parse::<Shell>() else {
        eprintln!("docugen completion: unsupported shell '{shell}'");
        eprintln!("supported: bash, zsh, fish, elvish, powershell");
        return 2;
    };

    generate(target, &mut Cli::command(), "docugen", &mut std::io::stdout());
    0
}
