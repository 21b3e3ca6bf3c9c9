//! Help synthesis from declarative command metadata.

use std::io::{self, Write};

use super::Command;

/// Placeholder shown for commands with no help text.
const NO_DESCRIPTION: &str = "(no description available)";

/// Synthesized help details for a command. Computed on demand; never stored
/// on the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpInfo {
    pub name: String,
    /// First non-blank line of the help text.
    pub synopsis: String,
    /// Formatted usage block.
    pub usage: String,
    /// Full help text.
    pub help: String,
    /// Formatted flag summary; empty when the command declares no flags.
    pub flags: String,
    /// One level of subcommand help; populated only on request.
    pub commands: Vec<HelpInfo>,
}

impl<T> Command<T> {
    /// Returns help details for this command. If `include_commands` is true,
    /// one non-recursive level of subcommand help is generated as well;
    /// grandchildren are never included.
    ///
    /// The flag summary is left empty here; [`super::Env::help_info`] fills
    /// it in, since flag declarations need an environment.
    #[must_use]
    pub fn help_info(&self, include_commands: bool) -> HelpInfo {
        let help = self.help.trim();
        let prefix = format!("  {} ", self.name);
        let mut info = HelpInfo {
            name: self.name.clone(),
            synopsis: help.lines().next().unwrap_or_default().to_string(),
            usage: format!(
                "Usage:\n\n{}",
                indent(&prefix, &prefix, &self.usage_lines().join("\n"))
            ),
            help: help.to_string(),
            flags: String::new(),
            commands: Vec::new(),
        };
        if include_commands {
            info.commands = self.commands.iter().map(|c| c.help_info(false)).collect();
        }
        info
    }

    /// Parses and normalizes usage lines. The command name is stripped from
    /// the head of each line if present; a line consisting of the name alone
    /// is a deliberate blank separator.
    fn usage_lines(&self) -> Vec<String> {
        let prefix = format!("{} ", self.name);
        let mut lines = Vec::new();
        for line in self.usage.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == self.name {
                lines.push(String::new());
            } else {
                lines.push(line.strip_prefix(&prefix).unwrap_or(line).to_string());
            }
        }
        lines
    }
}

/// Indents `text`: `first` is prepended to the first line and `prefix` to
/// all subsequent lines.
fn indent(first: &str, prefix: &str, text: &str) -> String {
    format!("{first}{}", text.replace('\n', &format!("\n{prefix}")))
}

impl HelpInfo {
    /// Writes a usage summary followed by a blank line.
    pub fn write_usage<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{}\n\n", self.usage)
    }

    /// Writes a usage summary and the command synopsis, plus the flag
    /// summary when the command declares flags.
    pub fn write_synopsis<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.write_usage(w)?;
        if self.synopsis.is_empty() {
            write!(w, "{NO_DESCRIPTION}\n\n")?;
        } else {
            write!(w, "{}\n\n", self.synopsis)?;
        }
        if !self.flags.is_empty() {
            write!(w, "{}\n\n", self.flags)?;
        }
        Ok(())
    }

    /// Writes a complete help description: usage summary, full help text,
    /// flag summary, and the subcommand table when one was requested.
    pub fn write_long<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.write_usage(w)?;
        if self.help.is_empty() {
            write!(w, "{NO_DESCRIPTION}\n\n")?;
        } else {
            write!(w, "{}\n\n", self.help)?;
        }
        if !self.flags.is_empty() {
            write!(w, "{}\n\n", self.flags)?;
        }
        if !self.commands.is_empty() {
            writeln!(w, "Subcommands:")?;
            let width = self
                .commands
                .iter()
                .map(|c| self.name.len() + 1 + c.name.len())
                .max()
                .unwrap_or_default();
            for c in &self.commands {
                let label = format!("{} {}", self.name, c.name);
                let synopsis = if c.synopsis.is_empty() {
                    NO_DESCRIPTION
                } else {
                    &c.synopsis
                };
                writeln!(w, "  {label:<width$} : {synopsis}")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}
