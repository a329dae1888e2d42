use std::path::PathBuf;

use clap::Parser;
use quill_common::Tool;

/// Quill: paraphrase, fix grammar and write abstracts from the terminal.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override, e.g. `quill=debug,quill_ai=debug`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Tool to start with (Paraphrase, "Fix Grammar", "Abstract Writing" or 1-3).
    #[arg(short, long)]
    pub tool: Option<Tool>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_by_name_and_number() {
        let args = Args::try_parse_from(["quill", "--tool", "fix grammar"]).unwrap();
        assert_eq!(args.tool, Some(Tool::FixGrammar));

        let args = Args::try_parse_from(["quill", "-t", "3"]).unwrap();
        assert_eq!(args.tool, Some(Tool::AbstractWriting));
    }

    #[test]
    fn rejects_unknown_tool() {
        assert!(Args::try_parse_from(["quill", "--tool", "translate"]).is_err());
    }

    #[test]
    fn all_flags_optional() {
        let args = Args::try_parse_from(["quill"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
        assert!(args.tool.is_none());
    }
}
