//! Labels command - show the label table the parser will use.

use clap::Args;
use console::style;

use cnix_core::ValueGrammar;

use super::config::load_config;

/// Arguments for the labels command.
#[derive(Args)]
pub struct LabelsArgs {
    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: LabelsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = config.build_parser();
    let rules = parser.rules();

    if args.json {
        println!("{}", serde_json::to_string_pretty(rules)?);
        return Ok(());
    }

    for rule in rules.iter() {
        println!(
            "{} ({})",
            style(rule.kind).bold(),
            describe_grammar(&rule.grammar)
        );
        println!("  {}", rule.label.canonical);
        for alias in &rule.label.aliases {
            println!("  {} {}", style("~").dim(), alias);
        }
    }

    Ok(())
}

fn describe_grammar(grammar: &ValueGrammar) -> String {
    match grammar {
        ValueGrammar::Name => "letters and spaces".to_string(),
        ValueGrammar::Date => "first d.m.y date".to_string(),
        ValueGrammar::Sex => "F or M".to_string(),
        ValueGrammar::Height => "first d,dd".to_string(),
        ValueGrammar::UppercaseWord { longer_than } => {
            format!("uppercase word, more than {} letters", longer_than)
        }
    }
}
