mod debug_report;

use commit_actions::identity::{
    CommitterStyle, DomainAugmentLookup, EmailAddressLookup, LookupChain, UserLookup, UserMapLookup,
};
use commit_actions::{ActionScope, Extractor, ExtractorConfig, Options, Vocabulary};
use std::collections::HashSet;
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "COMMIT_ACTIONS_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let extractor = match build_extractor(&config) {
        Ok(extractor) => extractor,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let user = match resolve_committer(&config) {
        Ok(user) => user,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let res = extractor.extract_verbose(&config.input);
    let updates = if config.updates { Some(extractor.updates(&res.map)) } else { None };

    if config.json {
        let mut out = serde_json::json!({ "actions": res.map });
        if let Some(updates) = &updates {
            out["updates"] = serde_json::json!(updates);
        }
        if let Some((committer, user)) = &user {
            out["committer"] = serde_json::json!({ "value": committer, "user": user });
        }
        match serde_json::to_string_pretty(&out) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("error: failed to serialize result: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    debug_report::print_run(&res, updates.as_deref(), user.as_ref(), config.color);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).try_init();
}

struct CliConfig {
    input: String,
    config_path: Option<String>,
    scope: Option<ActionScope>,
    json: bool,
    updates: bool,
    color: bool,
    committer: Option<String>,
    vcs: String,
    user_map: Option<String>,
    domain: Option<String>,
    known_users: Option<String>,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut config_path = None;
    let mut scope = None;
    let mut json = false;
    let mut updates = false;
    let mut color = io::stdout().is_terminal();
    let mut committer = None;
    let mut vcs = "git".to_string();
    let mut user_map = None;
    let mut domain = None;
    let mut known_users = None;
    let mut args = std::env::args().skip(1).peekable();

    fn value_of(flag: &str, value: Option<String>) -> Result<String, String> {
        value.ok_or_else(|| format!("error: {flag} expects a value"))
    }

    fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
        if input.is_some() {
            return Err("error: message provided multiple times".to_string());
        }
        *input = Some(value);
        Ok(())
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("commit-actions {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--updates" => updates = true,
            "-c" | "--config" => config_path = Some(value_of("--config", args.next())?),
            "--scope" => scope = Some(value_of("--scope", args.next())?.parse::<ActionScope>()?),
            "--committer" => committer = Some(value_of("--committer", args.next())?),
            "--vcs" => vcs = value_of("--vcs", args.next())?,
            "--user-map" => user_map = Some(value_of("--user-map", args.next())?),
            "--domain" => domain = Some(value_of("--domain", args.next())?),
            "--known-users" => known_users = Some(value_of("--known-users", args.next())?),
            "-m" | "--message" => set_input(&mut input, value_of("--message", args.next())?)?,
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--config=") => config_path = Some(arg.trim_start_matches("--config=").to_string()),
            _ if arg.starts_with("--scope=") => {
                scope = Some(arg.trim_start_matches("--scope=").parse::<ActionScope>()?);
            }
            _ if arg.starts_with("--message=") => {
                set_input(&mut input, arg.trim_start_matches("--message=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no commit message provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, config_path, scope, json, updates, color, committer, vcs, user_map, domain, known_users })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn build_extractor(config: &CliConfig) -> Result<Extractor, String> {
    let (vocabulary, mut options) = match &config.config_path {
        Some(path) => ExtractorConfig::load(path)
            .and_then(ExtractorConfig::into_parts)
            .map_err(|err| format!("error: invalid --config: {err}"))?,
        None => (Vocabulary::standard(), Options::default()),
    };
    if let Some(scope) = config.scope {
        options.scope = scope;
    }
    Ok(Extractor::with_options(vocabulary, options))
}

/// Resolve `--committer` through the lookups configured on the command line.
fn resolve_committer(config: &CliConfig) -> Result<Option<(String, Option<String>)>, String> {
    let Some(committer) = &config.committer else {
        return Ok(None);
    };
    let style = CommitterStyle::for_vcs(&config.vcs).map_err(|err| format!("error: invalid --vcs: {err}"))?;

    let mut chain = LookupChain::new();
    if let Some(spec) = &config.user_map {
        let lookup = UserMapLookup::from_config(spec, style).map_err(|err| format!("error: invalid --user-map: {err}"))?;
        chain.push(Box::new(lookup));
    }
    if let Some(path) = &config.known_users {
        let users = read_known_users(path)?;
        if let Some(domain) = &config.domain {
            let lookup = DomainAugmentLookup::new(domain, users.clone(), style)
                .map_err(|err| format!("error: invalid --domain: {err}"))?;
            chain.push(Box::new(lookup));
        }
        chain.push(Box::new(EmailAddressLookup::new(users)));
    } else if config.domain.is_some() {
        return Err("error: --domain requires --known-users".to_string());
    }

    if chain.is_empty() {
        return Err("error: --committer requires --user-map or --known-users".to_string());
    }
    Ok(Some((committer.clone(), chain.lookup(committer))))
}

fn read_known_users(path: &str) -> Result<HashSet<String>, String> {
    let text = std::fs::read_to_string(path).map_err(|err| format!("error: failed to read --known-users: {err}"))?;
    Ok(text.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')).map(str::to_string).collect())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "commit-actions {version}

Extract artifact references and lifecycle actions from a commit message.

Usage:
  commit-actions [OPTIONS] [--] <message...>
  commit-actions [OPTIONS] --message <text>

Options:
  -m, --message <text>       Commit message. If omitted, reads remaining args
                             or stdin when no args are provided.
  -c, --config <file>        TOML vocabulary config. Default: stock S/US/DE/TA/TC.
  --scope <scope>            'global' or 'per-abbreviation'. Overrides the config.
  --updates                  Also list the tracker field updates implied.
  --json                     Print JSON instead of the report.
  --committer <value>        Committer string to map to a tracker user.
  --vcs <name>               VCS the committer came from. Default: git
  --user-map <file,sep>      Committer table file and separator character.
  --known-users <file>       Known tracker user names, one per line.
  --domain <domain>          Try <identifier>@<domain> against known users.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}          Log filter (e.g. 'debug'). Default: warn

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments, config or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
