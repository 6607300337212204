use clap::{Args, Parser, Subcommand, ValueEnum};

use name_search::config::AppConfig;
use name_search::error::ConfigError;
use name_search::models::{Language, StrategyKind};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum, Debug)]
pub enum FormatOpt {
    Json,
    Csv,
}

impl FormatOpt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn from_config(s: Option<&str>) -> Self {
        match s {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl std::fmt::Display for FormatOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "name_search",
    version,
    about = "Phonetic and fuzzy search over Hebrew/English name records",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one query against the record files
    Search(SearchArgs),
    /// Answer one JSON request per input line with one JSON response per line
    Batch(BatchArgs),
    /// Print the phonetic code of each word
    Encode {
        #[arg(long, value_enum)]
        lang: Language,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print the weighted edit distance between two tokens
    Distance { a: String, b: String },
    /// Write a .env template
    EnvTemplate {
        #[arg(default_value = ".env.template")]
        path: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Directory holding the record files (falls back to NAME_SEARCH_DATA_DIR)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<String>,
    /// Comma separated record files (falls back to NAME_SEARCH_FILES)
    #[arg(long, value_delimiter = ',', value_name = "FILES")]
    pub files: Vec<String>,
    /// Score the fuzzy scan on all cores (falls back to NAME_SEARCH_PARALLEL_FUZZY)
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub data: DataArgs,
    /// Query text
    #[arg(long, short = 't')]
    pub text: String,
    /// Query language
    #[arg(long, short = 'l', value_enum)]
    pub lang: Language,
    /// Strategies to run, in order (repeatable or comma separated)
    #[arg(long = "strategy", short = 's', value_enum, value_delimiter = ',')]
    pub strategies: Vec<StrategyKind>,
    /// Maximum edit distance per token for fuzzy matches (falls back to NAME_SEARCH_MAX_SCORE)
    #[arg(long = "max-score", value_name = "SCORE")]
    pub max_score: Option<f64>,
    /// Write results here instead of stdout
    #[arg(long = "out", value_name = "PATH")]
    pub out_path: Option<String>,
    /// Output format (falls back to NAME_SEARCH_FORMAT)
    #[arg(long, value_enum)]
    pub format: Option<FormatOpt>,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub data: DataArgs,
    /// JSON lines file with requests, or '-' for stdin
    #[arg(long, default_value = "-")]
    pub input: String,
}

impl DataArgs {
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            cfg.data.data_dir = Some(dir.clone());
        }
        if !self.files.is_empty() {
            cfg.data.files = self.files.clone();
        }
        if self.parallel {
            cfg.search.parallel_fuzzy = true;
        }
    }
}

impl SearchArgs {
    /// Overlay command-line values on `base` and validate the result.
    pub fn to_app_config(&self, mut base: AppConfig) -> Result<AppConfig, ConfigError> {
        self.data.apply(&mut base);
        if !self.strategies.is_empty() {
            base.search.strategies = self.strategies.clone();
        }
        if let Some(score) = self.max_score {
            base.search.max_score = score;
        }
        if let Some(path) = &self.out_path {
            base.export.out_path = Some(path.clone());
        }
        if let Some(fmt) = self.format {
            base.export.format = Some(fmt.as_str().into());
        }
        base.validate()?;
        Ok(base)
    }
}
