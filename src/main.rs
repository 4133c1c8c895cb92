use std::path::PathBuf;

use argh::FromArgs;
use env_logger::Env;
use log::debug;

use finder::config::FinderConfig;
use finder::corpus::Corpus;
use finder::finder::Finder;
use finder::tokenizer::TokenizerState;

#[derive(FromArgs, Debug)]
/// Approximate-match search over a static corpus.
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Index(IndexArgs),
    Search(SearchArgs),
}

#[derive(FromArgs, Debug)]
/// Build a search index from a corpus file.
#[argh(subcommand, name = "index")]
struct IndexArgs {
    /// input corpus file, one entry per line
    #[argh(option, short = 'i')]
    input: PathBuf,
    /// output index file (JSON)
    #[argh(option, short = 'o')]
    output: PathBuf,
    /// tokenizer kind: char, bigram, or jamo
    #[argh(option, short = 't', default = "\"char\".to_string()")]
    tokenizer: String,
    /// minimum token frequency to keep in the vocabulary
    #[argh(option, short = 'f', default = "1")]
    min_freq: u32,
    /// treat each corpus line as already whitespace-tokenized
    #[argh(switch)]
    pretokenized: bool,
    /// enable NFKD/NFKC unicode normalization
    #[argh(switch)]
    unicode: bool,
    /// lowercase before tokenizing
    #[argh(switch)]
    lowercase: bool,
    /// collapse digit runs before tokenizing
    #[argh(switch)]
    number: bool,
}

#[derive(FromArgs, Debug)]
/// Search a previously built index.
#[argh(subcommand, name = "search")]
struct SearchArgs {
    /// index file to load (JSON)
    #[argh(option, short = 'i')]
    input: PathBuf,
    /// query string
    #[argh(option, short = 'q')]
    query: String,
    /// maximum edit distance
    #[argh(option, short = 'k', default = "1")]
    max_distance: u32,
    /// treat the query as already whitespace-tokenized
    #[argh(switch)]
    pretokenized: bool,
    /// log per-query diagnostics
    #[argh(switch)]
    verbose: bool,
}

fn parse_tokenizer_kind(name: &str) -> finder::tokenizer::TokenizerKind {
    match name {
        "char" | "character" => finder::tokenizer::TokenizerKind::Character,
        "bigram" => finder::tokenizer::TokenizerKind::Bigram,
        "jamo" => finder::tokenizer::TokenizerKind::Jamo,
        other => panic!("unknown tokenizer kind: {other:?} (expected char, bigram, or jamo)"),
    }
}

fn main() {
    let args: Args = argh::from_env();

    let env = Env::default().filter_or("FINDER_LOG", "debug");
    env_logger::init_from_env(env);
    debug!("{:?}", args);

    match args.command {
        Command::Index(index_args) => run_index(index_args),
        Command::Search(search_args) => run_search(search_args),
    }
}

fn run_index(args: IndexArgs) {
    let config = FinderConfig {
        normalizer: finder::normalizer::NormalizerConfig {
            unicode: args.unicode,
            lowercase: args.lowercase,
            number: args.number,
        },
        tokenizer_kind: parse_tokenizer_kind(&args.tokenizer),
        min_freq: args.min_freq,
    };
    let tokenizer = config
        .tokenizer_kind
        .build(config.normalizer.clone(), config.min_freq);

    let mut finder = Finder::new(tokenizer);
    finder
        .index(Corpus::File(args.input), args.pretokenized)
        .expect("failed to build index");
    finder
        .dump(&args.output)
        .expect("failed to write index file");
}

fn run_search(args: SearchArgs) {
    let finder: Finder<TokenizerState> =
        Finder::load(&args.input).expect("failed to load index file");
    let hits = finder
        .search(&args.query, args.max_distance, args.pretokenized, args.verbose)
        .expect("search failed");
    for hit in hits {
        println!("{}\t{}\t{}", hit.idx, hit.data, hit.distance);
    }
}
