use commit_actions::{ExtractionVerbose, StateUpdate, TokenRecord};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(
    res: &ExtractionVerbose,
    updates: Option<&[StateUpdate]>,
    committer: Option<&(String, Option<String>)>,
    color: bool,
) {
    let palette = ansi::Palette::new(color);
    let preview: String = res.text.split_whitespace().collect::<Vec<_>>().join(" ").chars().take(100).collect();
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Scanning: \"{}\"", preview), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Tokens ━━━", ansi::GRAY));
    print_tokens(res, &palette);

    println!("\n{}", palette.paint("━━━ Groups ━━━", ansi::GRAY));
    if res.trace.groups.is_empty() {
        println!("{}", palette.dim("  No groups closed"));
    } else {
        for (idx, group) in res.trace.groups.iter().enumerate() {
            println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), group);
        }
    }

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    if res.map.is_empty() {
        println!("{}", palette.dim("  No artifacts extracted"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No token looks like an artifact reference (e.g. DE123)");
        println!("  • An unknown artifact prefix stopped the scan before any reference");
        println!("  • Actions were found but no artifact followed them");
        println!("\n{}", palette.dim("  Tip: Set COMMIT_ACTIONS_LOG=debug to see group boundaries"));
    } else {
        for entry in &res.map {
            let action = match &entry.action {
                Some(action) => palette.bold(palette.paint(action, ansi::GREEN)),
                None => palette.dim("(no action)"),
            };
            println!("  {} {} {}", action, palette.dim("→"), palette.paint(entry.artifacts.join(", "), ansi::YELLOW));
        }
    }

    if let Some(updates) = updates {
        println!("\n{}", palette.paint("━━━ Updates ━━━", ansi::GRAY));
        if updates.is_empty() {
            println!("{}", palette.dim("  No field updates implied"));
        }
        for update in updates {
            println!(
                "  {} {} {} = {}",
                palette.paint(&update.artifact, ansi::YELLOW),
                palette.dim("│"),
                palette.paint(&update.field, ansi::BLUE),
                palette.bold(palette.paint(&update.value, ansi::GREEN)),
            );
        }
    }

    if let Some((value, user)) = committer {
        println!("\n{}", palette.paint("━━━ Committer ━━━", ansi::GRAY));
        let user = match user {
            Some(user) => palette.paint(user, ansi::GREEN),
            None => palette.paint("not found", ansi::RED),
        };
        println!("  {} {} {}", value, palette.dim("→"), user);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Tokens: {}",
        palette.paint(format!("{:?}", res.trace.elapsed), ansi::GREEN),
        palette.paint(res.trace.token_count.to_string(), ansi::CYAN),
    );
    println!();
}

fn print_tokens(res: &ExtractionVerbose, palette: &ansi::Palette) {
    let shaped: Vec<&TokenRecord> = res.trace.tokens.iter().filter(|t| !t.shape.is_empty()).collect();
    if shaped.is_empty() {
        println!("{}", palette.dim("  No action- or artifact-shaped tokens"));
    }
    for token in shaped {
        println!("  {}", fmt_token_compact(token, palette));
    }

    let skipped = res.trace.tokens.iter().filter(|t| t.shape.is_empty()).count();
    if skipped > 0 {
        println!("  {}", palette.dim(format!("... {} plain tokens skipped", skipped)));
    }

    if let Some(abort) = &res.trace.abort {
        println!(
            "  {} {} {}",
            palette.paint("✗ stopped at", ansi::RED),
            palette.paint(format!("#{} {}", abort.position, abort.token), ansi::YELLOW),
            palette.dim(format!("(unknown prefix '{}', {} tokens unread)", abort.prefix, unread(res))),
        );
    }
}

fn unread(res: &ExtractionVerbose) -> usize {
    res.trace.token_count.saturating_sub(res.trace.tokens.len())
}

fn fmt_token_compact(token: &TokenRecord, palette: &ansi::Palette) -> String {
    let kind = match (token.is_action(), token.is_artifact()) {
        (true, true) => palette.paint("action+artifact", ansi::MAGENTA),
        (true, false) => palette.paint("action", ansi::BLUE),
        _ => palette.paint(format!("artifact {}", token.prefix.as_deref().unwrap_or("?")), ansi::CYAN),
    };
    format!("{} {} {}", palette.paint(format!("#{}", token.position), ansi::GRAY), palette.bold(&token.token), kind)
}
