use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use wordsleuth_core::config::{default_staging_dir, DEFAULT_TOP_K};
use wordsleuth_core::{CollisionPolicy, ForbiddenWordList, ScanConfig};

/// WordSleuth - find, count, and redact forbidden words across a directory tree
#[derive(Parser, Debug, Clone)]
#[command(name = "wordsleuth")]
#[command(version)]
#[command(about = "Find, count, and redact forbidden words across a directory tree", long_about = None)]
pub struct Args {
    /// Directory to scan
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Word list file, one forbidden word per line
    #[arg(short = 'w', long = "words", value_name = "FILE")]
    pub words_file: Option<PathBuf>,

    /// Forbidden word (repeatable; appended after the word list file)
    #[arg(long = "word", value_name = "WORD")]
    pub words: Vec<String>,

    /// Directory for redacted copies [default: <temp>/ForbiddenWordsSearch]
    #[arg(short = 's', long = "staging", value_name = "DIR")]
    pub staging: Option<PathBuf>,

    /// Worker threads (default: one per CPU)
    #[arg(short = 'j', long = "workers")]
    pub workers: Option<usize>,

    /// Number of words in the final ranking
    #[arg(long = "top", default_value_t = DEFAULT_TOP_K)]
    pub top: usize,

    /// Give colliding copies a numeric suffix instead of overwriting
    #[arg(long = "uniquify")]
    pub uniquify: bool,

    /// Write the final report to a .json or .csv file
    #[arg(short = 'o', long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Only print matches and the final report
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Do not read pause/resume/stop commands from stdin
    #[arg(long = "no-input")]
    pub no_input: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Validate the arguments
    pub fn validate(&self) -> Result<(), String> {
        if self.words_file.is_none() && self.words.is_empty() {
            return Err("no forbidden words given: use --words <FILE> or --word <WORD>".to_string());
        }
        if self.top == 0 {
            return Err("--top must be at least 1".to_string());
        }
        if self.workers == Some(0) {
            return Err("--workers must be at least 1".to_string());
        }
        if let Some(path) = &self.export {
            crate::export::ExportFormat::from_path(path)?;
        }
        Ok(())
    }

    /// Load the word list file (if any) and append inline `--word`s.
    pub fn load_words(&self) -> anyhow::Result<ForbiddenWordList> {
        let mut text = match &self.words_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("cannot read word list {}", path.display()))?,
            None => String::new(),
        };
        for word in &self.words {
            text.push('\n');
            text.push_str(word);
        }
        Ok(ForbiddenWordList::from_text(&text))
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            staging_dir: self.staging.clone().unwrap_or_else(default_staging_dir),
            workers: self.workers,
            top_k: self.top,
            collision_policy: if self.uniquify {
                CollisionPolicy::Uniquify
            } else {
                CollisionPolicy::Overwrite
            },
            ..ScanConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wordsleuth").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["/data", "--word", "spam"]);
        assert_eq!(args.root, PathBuf::from("/data"));
        assert_eq!(args.top, 10);
        assert!(args.validate().is_ok());

        let config = args.scan_config();
        assert_eq!(config.collision_policy, CollisionPolicy::Overwrite);
        assert_eq!(config.staging_dir, default_staging_dir());
        assert_eq!(config.top_k, 10);
    }

    #[test]
    fn words_are_required() {
        assert!(parse(&["/data"]).validate().is_err());
    }

    #[test]
    fn zero_top_or_workers_rejected() {
        assert!(parse(&["/data", "--word", "x", "--top", "0"]).validate().is_err());
        assert!(parse(&["/data", "--word", "x", "-j", "0"]).validate().is_err());
    }

    #[test]
    fn unknown_export_extension_rejected() {
        assert!(parse(&["/data", "--word", "x", "-o", "out.xml"]).validate().is_err());
        assert!(parse(&["/data", "--word", "x", "-o", "out.JSON"]).validate().is_ok());
    }

    #[test]
    fn uniquify_and_staging_map_to_config() {
        let config = parse(&["/data", "--word", "x", "--uniquify", "-s", "/tmp/st", "-j", "3"])
            .scan_config();
        assert_eq!(config.collision_policy, CollisionPolicy::Uniquify);
        assert_eq!(config.staging_dir, PathBuf::from("/tmp/st"));
        assert_eq!(config.workers, Some(3));
    }

    #[test]
    fn file_words_come_before_inline_words() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("words.txt");
        std::fs::write(&file, "alpha\r\nbeta\r\n").unwrap();
        let args = parse(&[
            "/data",
            "-w",
            file.to_str().unwrap(),
            "--word",
            "gamma",
        ]);
        let words = args.load_words().unwrap();
        assert_eq!(words.iter().collect::<Vec<_>>(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn missing_word_file_is_an_error() {
        let args = parse(&["/data", "-w", "/definitely/not/here.txt"]);
        assert!(args.load_words().is_err());
    }
}
