//! Tolerant command-line parsing for the one-shot import run.
//!
//! The parser never fails: `--key=value` tokens become flags, everything
//! else is positional, and flags we do not recognize are kept in a side
//! map that nothing reads. The only hard requirement is the input file
//! path; when it is missing the caller prints usage and exits non-zero.
use std::collections::HashMap;
use std::path::PathBuf;

/// Immutable configuration for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub file_path: PathBuf,
    pub username: Option<String>,
    pub min_likes: u64,
    pub min_bookmarks: u64,
    pub min_retweets: u64,
    pub min_replies: u64,
    pub text_only: bool,
    /// Flags we did not recognize. Parsed so they are visibly no-ops,
    /// never consulted by the pipeline.
    pub ignored_flags: HashMap<String, Option<String>>,
}

/// Parse the process arguments (program name already stripped).
/// Returns `None` when no input file path was given.
pub fn parse<I>(args: I) -> Option<ImportOptions>
where
    I: IntoIterator<Item = String>,
{
    let mut flags: HashMap<String, Option<String>> = HashMap::new();
    let mut positional: Vec<String> = Vec::new();

    for arg in args {
        if let Some(body) = arg.strip_prefix("--") {
            match body.split_once('=') {
                Some((key, value)) => flags.insert(key.to_string(), Some(value.to_string())),
                None => flags.insert(body.to_string(), None),
            };
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let file_path = PathBuf::from(positional.next()?);
    let username = positional.next();

    // A bare `--text-only` enables the filter; `--text-only=anything` does not.
    let text_only = matches!(flags.remove("text-only"), Some(None));
    let min_likes = take_count(&mut flags, "min-likes");
    let min_bookmarks = take_count(&mut flags, "min-bookmarks");
    let min_retweets = take_count(&mut flags, "min-retweets");
    let min_replies = take_count(&mut flags, "min-replies");

    Some(ImportOptions {
        file_path,
        username,
        min_likes,
        min_bookmarks,
        min_retweets,
        min_replies,
        text_only,
        ignored_flags: flags,
    })
}

/// Integer flag value; absent, valueless, or unparseable all mean 0.
fn take_count(flags: &mut HashMap<String, Option<String>>, key: &str) -> u64 {
    flags
        .remove(key)
        .flatten()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

pub fn usage() -> &'static str {
    "Usage: swipefile-import <path-to-json> [username] [flags]

Flags:
  --min-likes=X       Only import posts with >= X likes
  --min-bookmarks=X   Only import posts with >= X bookmarks
  --min-retweets=X    Only import posts with >= X retweets
  --min-replies=X     Only import posts with >= X replies
  --text-only         Skip posts that are just links (image/video posts)"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_vec(args: &[&str]) -> Option<ImportOptions> {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_file_path_yields_none() {
        assert!(parse_vec(&[]).is_none());
        assert!(parse_vec(&["--min-likes=5"]).is_none());
    }

    #[test]
    fn positionals_map_to_path_and_username() {
        let opts = parse_vec(&["tweets.json", "thedankoe"]).unwrap();
        assert_eq!(opts.file_path, PathBuf::from("tweets.json"));
        assert_eq!(opts.username.as_deref(), Some("thedankoe"));
    }

    #[test]
    fn thresholds_parse_and_default() {
        let opts = parse_vec(&["tweets.json", "--min-likes=500", "--min-bookmarks=abc"]).unwrap();
        assert_eq!(opts.min_likes, 500);
        assert_eq!(opts.min_bookmarks, 0);
        assert_eq!(opts.min_retweets, 0);
        assert_eq!(opts.min_replies, 0);
    }

    #[test]
    fn text_only_requires_bare_flag() {
        assert!(parse_vec(&["tweets.json", "--text-only"]).unwrap().text_only);
        assert!(!parse_vec(&["tweets.json", "--text-only=true"]).unwrap().text_only);
        assert!(!parse_vec(&["tweets.json"]).unwrap().text_only);
    }

    #[test]
    fn unknown_flags_are_absorbed_not_rejected() {
        let opts = parse_vec(&["tweets.json", "--verbose", "--batch=9"]).unwrap();
        assert_eq!(opts.ignored_flags.get("verbose"), Some(&None));
        assert_eq!(
            opts.ignored_flags.get("batch"),
            Some(&Some("9".to_string()))
        );
        assert_eq!(opts.min_likes, 0);
    }

    #[test]
    fn flag_value_splits_on_first_equals() {
        let opts = parse_vec(&["tweets.json", "--note=a=b"]).unwrap();
        assert_eq!(opts.ignored_flags.get("note"), Some(&Some("a=b".to_string())));
    }
}
