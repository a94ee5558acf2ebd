use std::fmt::Write;

use faqbot_core::types::{FaqPair, QueryResult};

pub fn render(result: &QueryResult) -> String {
    let mut out = String::new();
    match result {
        QueryResult::Matched { answer, matched_question, score } => {
            let _ = writeln!(out, "🤖 Bot: {answer}  (score: {score:.2})");
            let _ = writeln!(out, "   Matched question: {matched_question}");
        }
        QueryResult::Unmatched { score, suggestions } => {
            let _ = writeln!(out, "🤖 Bot: Sorry, I couldn't find an exact answer (best score: {score:.2}). Did you mean:");
            for s in suggestions {
                let _ = writeln!(out, "  - {s}");
            }
        }
    }
    out
}

pub fn render_faqs(faqs: &[FaqPair]) -> String {
    let mut out = String::new();
    for (i, faq) in faqs.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. Q: {}", i + 1, faq.question);
        let _ = writeln!(out, "    A: {}", faq.answer);
    }
    out
}
