//! Rendering of exploration reports

use colored::Colorize;
use veripath_engine::{Literal, PathOutcome, PathRecord};

/// Print the colored per-path report for one explored target.
///
/// Returned paths print green as `name(args) = values`; failed paths
/// print the call bold red with the assertion message indented below.
pub fn print_report(name: &str, records: &[PathRecord]) {
    println!("{}", format!("Exploring `{name}`...").bold().underline());
    for record in records {
        let call = render_call(name, record);
        match &record.outcome {
            PathOutcome::Returned(values) => {
                let line = match values.as_slice() {
                    [] => call,
                    [single] => format!("{call} = {single}"),
                    many => format!("{call} = ({})", join(many)),
                };
                println!("{}", line.green());
            }
            PathOutcome::Failed(message) => {
                println!("{}", call.red().bold());
                println!("{}", format!("  raised: {message}").red());
            }
        }
    }
    println!();
    println!("Entire tree explored.");
}

/// Print records as pretty JSON.
pub fn print_json(records: &[PathRecord]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

fn render_call(name: &str, record: &PathRecord) -> String {
    let args: Vec<String> = record
        .witness
        .iter()
        .map(|(_, value)| value.to_string())
        .collect();
    format!("{name}({})", args.join(", "))
}

fn join(values: &[Literal]) -> String {
    values
        .iter()
        .map(Literal::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
