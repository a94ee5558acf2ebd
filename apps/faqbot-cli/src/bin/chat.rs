use std::io::{self, Write};

use faqbot_cli::bootstrap::{build_context, init_tracing};
use faqbot_cli::render::{render, render_faqs};
use faqbot_core::types::FaqPair;

fn show_help() {
    println!("🎯 Commands:");
    println!("  :faqs     - View all FAQs");
    println!("  :help     - Show this help message");
    println!("  :quit     - Exit");
    println!("  <text>    - Ask a question");
    println!();
}

/// Interactive FAQ chat over the configured corpus.
fn main() -> anyhow::Result<()> {
    init_tracing();
    println!("🤖 WIT Darbhanga Semantic Chatbot");
    println!("=================================");
    println!("Ask me anything about WIT Darbhanga: admissions, hostel, library, placements, WiFi, etc.");

    let ctx = build_context()?;
    let faqs: Vec<FaqPair> = ctx.index().entries().iter().map(FaqPair::from).collect();
    let rt = tokio::runtime::Runtime::new()?;
    println!("✅ {} FAQs loaded", ctx.index().len());
    show_help();

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            ":help" | ":h" => show_help(),
            ":faqs" | ":f" => print!("{}", render_faqs(&faqs)),
            ":quit" | ":q" | "quit" | "exit" => break,
            question => match rt.block_on(ctx.service().answer(question)) {
                Ok(result) => print!("{}", render(&result)),
                Err(e) => println!("❌ {}", e),
            },
        }
        println!();
    }
    println!("👋 Goodbye!");
    Ok(())
}
