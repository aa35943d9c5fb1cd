use colored::Colorize;
use product_lens::catalog::SupportedModel;

/// Execute the models command
pub fn execute() {
    println!("{}", "Known models:".bold());
    for model in SupportedModel::ALL {
        if model == SupportedModel::DEFAULT {
            println!("  {} {}", model.as_str().green(), "(default)".dimmed());
        } else {
            println!("  {}", model.as_str());
        }
    }
}
