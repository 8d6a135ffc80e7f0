//
//  listmonk-ops
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion scripts
//!
//! ```text
//! lmk completion zsh > ~/.zfunc/_lmk
//! ```

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};


/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_completions(self.shell, &mut handle);
        Ok(())
    }
}

fn write_completions<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, crate::APP_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_cover_subcommands() {
        let mut buffer = Vec::new();
        write_completions(Shell::Bash, &mut buffer);
        let script = String::from_utf8(buffer).unwrap();

        assert!(script.contains("lmk"));
        assert!(script.contains("subscribers"));
        assert!(script.contains("campaigns"));
    }
}
