//! List rules command implementation.

use anyhow::Result;
use openapi_lint::rules::{standard_rules, tag_group_rules};
use openapi_lint::RuleCollection;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let standard = standard_rules();
    let tag_groups = tag_group_rules();
    let collections: [&dyn RuleCollection; 2] = [&standard, &tag_groups];

    for collection in collections {
        println!("Collection: {}\n", collection.name());
        println!("{:<45} {:<14} Description", "Name", "Scope");
        println!("{}", "-".repeat(100));

        for name in collection.rule_names() {
            let rule = collection.rule(&name)?;
            println!("{:<45} {:<14} {}", rule.name(), rule.scope(), rule.description());
        }
        println!();
    }

    println!("Standard rules are used when the policy sets \"includeStandardRules\": true.");
    println!("Extension rules are always available.");
    println!("\nExample policy entry:");
    println!("  \"rules\": {{\"operation-summary-exist\": {{\"severity\": \"warning\"}}}}");

    Ok(())
}
