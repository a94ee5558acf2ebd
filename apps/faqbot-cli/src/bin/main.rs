use std::env;

use futures::future::join_all;

use faqbot_cli::args::parse_ask_args;
use faqbot_cli::bootstrap::{build_context, init_tracing, load_faqs, load_settings};
use faqbot_cli::render::{render, render_faqs};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <ask|faqs> [args...]", prog);
        eprintln!("  ask [--json] [--min-sim X] \"<question>\" [\"<question>\" ...]");
        eprintln!("  faqs");
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ask" => {
            let ask = parse_ask_args(&args).unwrap_or_else(|e| {
                eprintln!("{e}");
                eprintln!("Usage: faqbot ask [--json] [--min-sim X] \"<question>\" ...");
                std::process::exit(1)
            });
            let ctx = build_context()?;
            let service = ctx.service();
            let min_sim = ask.min_similarity;
            let results = tokio::runtime::Runtime::new()?.block_on(async {
                join_all(ask.questions.iter().map(|q| async move {
                    match min_sim {
                        Some(min) => service.answer_with(q, min).await,
                        None => service.answer(q).await,
                    }
                }))
                .await
            });

            let mut failed = false;
            for (question, result) in ask.questions.iter().zip(results) {
                match result {
                    Ok(result) if ask.json => println!("{}", serde_json::to_string(&result)?),
                    Ok(result) => {
                        println!("❓ {question}");
                        print!("{}", render(&result));
                    }
                    Err(e) => {
                        failed = true;
                        eprintln!("❌ {question}: {e}");
                    }
                }
            }
            if failed {
                std::process::exit(2);
            }
        }
        "faqs" => {
            let settings = load_settings()?;
            print!("{}", render_faqs(&load_faqs(&settings)?));
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
