use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_registry::{ComponentRegistry, DefinitionSummary};

#[derive(Debug, Args)]
pub struct ComponentsArgs {
    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Show each component's prop schema
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn components(args: ComponentsArgs) -> Result<()> {
    let table = ComponentRegistry::global().table();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&table)?),
        "text" => print_table(&table, args.verbose),
        other => anyhow::bail!("Unknown format: {}. Use: text or json", other),
    }

    Ok(())
}

fn print_table(table: &[DefinitionSummary], verbose: bool) {
    println!(
        "{}",
        format!("🧩 {} registered components", table.len())
            .bright_blue()
            .bold()
    );
    println!();

    for summary in table {
        let category = format!("{:?}", summary.category).to_lowercase();
        let children = if summary.accepts_children {
            "container".green()
        } else {
            "leaf".dimmed()
        };
        println!(
            "  {:<10} {:<12} {:<12} {}",
            summary.component_type.bright_white().bold(),
            summary.display_name,
            category,
            children
        );

        if !summary.variants.is_empty() {
            println!("  {:<10} variants: {}", "", summary.variants.join(", ").dimmed());
        }

        if verbose {
            for spec in &summary.prop_schema {
                let marker = if spec.required { "*" } else { " " };
                println!("  {:<10} {}{} ({:?})", "", marker, spec.key, spec.kind);
            }
        }
    }
}
