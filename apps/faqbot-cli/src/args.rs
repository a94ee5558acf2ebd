use anyhow::{anyhow, bail, Result};

/// Options of `faqbot ask`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AskArgs {
    pub json: bool,
    pub min_similarity: Option<f32>,
    /// One question per positional argument.
    pub questions: Vec<String>,
}

pub fn parse_ask_args(args: &[String]) -> Result<AskArgs> {
    let mut parsed = AskArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--min-sim" => {
                let value = iter.next().ok_or_else(|| anyhow!("--min-sim needs a value"))?;
                let value: f32 = value.parse().map_err(|e| anyhow!("invalid --min-sim {value:?}: {e}"))?;
                parsed.min_similarity = Some(value);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            question => parsed.questions.push(question.to_string()),
        }
    }
    if parsed.questions.is_empty() {
        bail!("no question given");
    }
    Ok(parsed)
}
