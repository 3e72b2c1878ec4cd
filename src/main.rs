//! CLI entrypoint.

use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use stddoc::core_api::config::index_path;
use stddoc::core_api::pattern::highlight_pattern;
use stddoc::core_api::search::{default_builtins, ignore_case_for, load_builtins, rank_builtins};
use stddoc::{CategorySet, DocsConfig, DocsSession, KeywordOutcome};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "STDDOC_LOG";

#[derive(Debug, Clone, Copy, ValueEnum)]
/// Member groups accepted by `--kind`.
enum KindSpec {
	/// Containers, primitives, error sets and other types.
	Types,
	/// Namespaces.
	Namespaces,
	/// Functions.
	Functions,
	/// Variables and constants.
	Values,
}

impl From<KindSpec> for CategorySet {
	fn from(spec: KindSpec) -> Self {
		match spec {
			KindSpec::Types => Self::TYPES,
			KindSpec::Namespaces => Self::NAMESPACES,
			KindSpec::Functions => Self::FUNCTIONS,
			KindSpec::Values => Self::VALUES,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
/// Output formats the CLI can emit.
enum OutputFormat {
	/// Human-readable text (default).
	Text,
	/// JSON records.
	Json,
}

#[derive(Args, Clone)]
struct CommonArgs {
	/// stddoc snapshot file to load (JSON or bincode declaration table)
	#[arg(long, global = true, value_name = "FILE")]
	index: Option<PathBuf>,

	/// Include private members in listings
	#[arg(short = 'p', long, global = true, default_value_t = false)]
	private: bool,

	/// Include Source sections in documents
	#[arg(long, global = true, default_value_t = false)]
	source: bool,

	/// User-facing name of the root module
	#[arg(long, global = true, value_name = "NAME")]
	alias: Option<String>,

	/// Internal root segment of fully qualified names
	#[arg(long, global = true, value_name = "NAME")]
	root: Option<String>,

	/// Enable debug logging
	#[arg(short = 'v', long, global = true, default_value_t = false)]
	verbose: bool,

	/// Disable ANSI colors in CLI output
	#[arg(long, global = true, default_value_t = false)]
	no_color: bool,
}

#[derive(Args, Clone)]
struct GetArgs {
	/// Declaration to document, e.g. `std.mem.eql` or `ArrayList`
	#[arg(default_value = "")]
	name: String,
}

#[derive(Args, Clone)]
struct ListArgs {
	/// Declaration whose members to list; the root module when omitted
	#[arg(default_value = "")]
	name: String,

	/// Comma-separated member groups to keep (types, namespaces, functions, values)
	#[arg(short = 'k', long, value_delimiter = ',', value_name = "KIND[,KIND...]")]
	kind: Vec<KindSpec>,

	/// Select the output format
	#[arg(short = 'f', long, value_enum, default_value = "text")]
	format: OutputFormat,
}

#[derive(Args, Clone)]
struct SearchArgs {
	/// Query text; case-insensitive unless it contains an uppercase letter
	#[arg(default_value = "")]
	query: String,

	/// Maximum number of results
	#[arg(short = 'l', long)]
	limit: Option<usize>,

	/// Select the output format
	#[arg(short = 'f', long, value_enum, default_value = "text")]
	format: OutputFormat,
}

#[derive(Args, Clone)]
struct BuiltinsArgs {
	/// Keyword to look for in builtin function names
	#[arg(default_value = "")]
	query: String,

	/// Replacement builtin list (JSON)
	#[arg(long, value_name = "FILE")]
	builtins: Option<PathBuf>,

	/// Select the output format
	#[arg(short = 'f', long, value_enum, default_value = "text")]
	format: OutputFormat,
}

#[derive(Subcommand, Clone)]
enum Command {
	/// Render the documentation of a declaration.
	Get(GetArgs),
	/// List the members of a declaration.
	List(ListArgs),
	/// Full-text search over the index.
	Search(SearchArgs),
	/// Rank builtin functions by keyword.
	Builtins(BuiltinsArgs),
	/// List the modules known to the index.
	Modules,
}

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Query standard library documentation from a stddoc snapshot file",
	long_about = "Query standard library documentation from a stddoc snapshot file.\n\n\
		stddoc reads its own declaration snapshots, serialized as JSON or bincode. It does not \
		read the compiler's compiled documentation index directly."
)]
/// Parsed command-line options for the stddoc CLI.
struct Cli {
	#[command(subcommand)]
	command: Command,

	#[command(flatten)]
	common: CommonArgs,
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.without_time()
		.init();
}

fn build_config(common: &CommonArgs) -> DocsConfig {
	let mut config = DocsConfig::default()
		.with_private(common.private)
		.with_source(common.source);
	if let Some(alias) = &common.alias {
		config = config.with_public_alias(alias.as_str());
	}
	if let Some(root) = &common.root {
		config = config.with_internal_root(root.as_str());
	}
	config
}

fn open_session(common: &CommonArgs, config: DocsConfig) -> Result<DocsSession, Box<dyn Error>> {
	let path = index_path(common.index.clone())?;
	Ok(DocsSession::open(&path, config)?)
}

fn run_get(common: &CommonArgs, args: &GetArgs) -> Result<(), Box<dyn Error>> {
	let mut session = open_session(common, build_config(common))?;
	match session.document(&args.name)? {
		Some(document) => print!("{document}"),
		None => println!("No documentation found for `{}`.", args.name),
	}
	Ok(())
}

fn run_list(common: &CommonArgs, args: &ListArgs) -> Result<(), Box<dyn Error>> {
	let filter = if args.kind.is_empty() {
		CategorySet::all()
	} else {
		args.kind
			.iter()
			.fold(CategorySet::empty(), |set, kind| set | CategorySet::from(*kind))
	};

	let mut session = open_session(common, build_config(common))?;
	let members = session.members(&args.name, filter)?;

	if args.format == OutputFormat::Json {
		println!("{}", serde_json::to_string_pretty(&members)?);
		return Ok(());
	}

	if members.is_empty() {
		println!("No members found for `{}`.", args.name);
		return Ok(());
	}
	let mut buffer = String::new();
	for member in &members {
		let line = if member.brief_doc.is_empty() {
			format!("{:<16} {}", member.category.label(), member.path)
		} else {
			format!("{:<16} {} - {}", member.category.label(), member.path, member.brief_doc)
		};
		buffer.push_str(&line);
		buffer.push('\n');
	}
	print!("{buffer}");
	Ok(())
}

fn run_search(common: &CommonArgs, args: &SearchArgs) -> Result<(), Box<dyn Error>> {
	let query = args.query.trim();
	if query.is_empty() {
		println!("Enter a search query, e.g. `stddoc search ArrayList`.");
		return Ok(());
	}

	let mut config = build_config(common);
	if let Some(limit) = args.limit {
		config = config.with_search_limit(limit);
	}
	let mut session = open_session(common, config)?;
	let hits = session.search(query)?;

	if args.format == OutputFormat::Json {
		println!("{}", serde_json::to_string_pretty(&hits)?);
		return Ok(());
	}

	if hits.is_empty() {
		println!("No results for `{query}`.");
		return Ok(());
	}
	let color = should_color_output(common);
	let ignore_case = ignore_case_for(query);
	let mut buffer = String::new();
	for hit in &hits {
		let fqn = if color {
			highlight_matches(&hit.fqn, query, ignore_case)
		} else {
			hit.fqn.clone()
		};
		buffer.push_str(&format!("{:<16} {fqn}", hit.category.label()));
		if !hit.brief.is_empty() {
			buffer.push_str(" - ");
			buffer.push_str(&hit.brief);
		}
		buffer.push('\n');
	}
	print!("{buffer}");
	Ok(())
}

fn run_builtins(common: &CommonArgs, args: &BuiltinsArgs) -> Result<(), Box<dyn Error>> {
	let builtins = match &args.builtins {
		Some(path) => load_builtins(path)?,
		None => default_builtins()?,
	};

	let ranked = match rank_builtins(&builtins, &args.query) {
		KeywordOutcome::Usage => {
			println!("Enter a keyword, e.g. `stddoc builtins overflow`.");
			return Ok(());
		}
		KeywordOutcome::Matches(ranked) => ranked,
	};

	if args.format == OutputFormat::Json {
		println!("{}", serde_json::to_string_pretty(&ranked)?);
		return Ok(());
	}

	if ranked.is_empty() {
		println!("No builtin functions match `{}`.", args.query.trim());
		return Ok(());
	}
	let color = should_color_output(common);
	let mut buffer = String::new();
	for entry in &ranked {
		let signature = if entry.builtin.signature.is_empty() {
			entry.builtin.name.clone()
		} else {
			entry.builtin.signature.clone()
		};
		let signature = if color {
			highlight_matches(&signature, args.query.trim(), true)
		} else {
			signature
		};
		buffer.push_str(&signature);
		buffer.push('\n');
		if !entry.builtin.description.is_empty() {
			buffer.push_str("    ");
			buffer.push_str(&entry.builtin.description);
			buffer.push('\n');
		}
	}
	print!("{buffer}");
	Ok(())
}

fn run_modules(common: &CommonArgs) -> Result<(), Box<dyn Error>> {
	let mut session = open_session(common, build_config(common))?;
	for module in session.modules()? {
		println!("{module}");
	}
	Ok(())
}

fn should_color_output(common: &CommonArgs) -> bool {
	if common.no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stdout().is_terminal()
}

/// Highlight every query term found in `text` in bright green and bold.
fn highlight_matches(text: &str, query: &str, ignore_case: bool) -> String {
	let Some(regex) = highlight_pattern(query, ignore_case) else {
		return text.to_string();
	};

	let mut result = String::with_capacity(text.len() * 2);
	let mut last_end = 0;
	for mat in regex.find_iter(text) {
		result.push_str(&text[last_end..mat.start()]);
		result.push_str(&mat.as_str().bright_green().bold().to_string());
		last_end = mat.end();
	}
	result.push_str(&text[last_end..]);
	result
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.common.verbose);

	if let Err(e) = run(cli) {
		eprintln!("{e}");
		process::exit(1);
	}
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
	match &cli.command {
		Command::Get(args) => run_get(&cli.common, args),
		Command::List(args) => run_list(&cli.common, args),
		Command::Search(args) => run_search(&cli.common, args),
		Command::Builtins(args) => run_builtins(&cli.common, args),
		Command::Modules => run_modules(&cli.common),
	}
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn help_names_the_snapshot_format() {
		let command = Cli::command();
		let about = command.get_about().map(ToString::to_string).unwrap_or_default();
		let long_about = command.get_long_about().map(ToString::to_string).unwrap_or_default();
		assert!(about.contains("stddoc snapshot file"));
		assert!(long_about.contains("does not read the compiler's compiled documentation index"));
	}
}
