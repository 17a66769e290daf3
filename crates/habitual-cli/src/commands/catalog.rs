//! Quotes and habit suggestions.

use habitual_core::SuggestionCategory;

use crate::context::Context;

pub fn quote() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open()?;
    if let Some(quote) = ctx.repo.random_quote() {
        println!("\"{}\"\n  - {}", quote.text, quote.author);
    }
    Ok(())
}

pub fn suggest(category: SuggestionCategory) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open()?;
    for suggestion in ctx.repo.suggestions_by_category(category) {
        println!("{:>3}  {}", suggestion.id, suggestion.text);
    }
    Ok(())
}
