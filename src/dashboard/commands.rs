//! Line commands typed into the dashboard

use crate::dashboard::render::ViewMode;
use crate::models::filter::{FilterSpec, SortField, SortOrder};

pub const HELP: &str = "\
Commands:
  search <text>          filter by name, ticker or handle (empty clears)
  sort <field> [asc|desc] marketCap | postsCount | followersCount | holdersCount
  followers <n>          minimum followers (accepts 1k, 5k, 10k)
  cap <min> [max]        market cap range, omit max for no upper bound
  view table|cards|chart switch view
  reset                  restore default filters
  refresh                fetch now
  help                   show this help
  quit                   exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    /// `None` order toggles when the field is already active
    Sort(SortField, Option<SortOrder>),
    MinFollowers(u64),
    MarketCap { min: f64, max: f64 },
    View(ViewMode),
    Reset,
    Refresh,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "sort" => {
                let mut parts = rest.split_whitespace();
                let field = parts
                    .next()
                    .ok_or_else(|| "sort needs a field".to_string())?
                    .parse::<SortField>()?;
                let order = parts.next().map(str::parse::<SortOrder>).transpose()?;
                Ok(Command::Sort(field, order))
            }
            "followers" => Ok(Command::MinFollowers(parse_count(rest)?)),
            "cap" => {
                let mut parts = rest.split_whitespace();
                let min = match parts.next() {
                    Some(raw) => parse_amount(raw)?,
                    None => 0.0,
                };
                let max = match parts.next() {
                    Some(raw) => parse_amount(raw)?,
                    None => f64::INFINITY,
                };
                Ok(Command::MarketCap { min, max })
            }
            "view" => Ok(Command::View(rest.parse()?)),
            "reset" => Ok(Command::Reset),
            "refresh" | "r" | "retry" => Ok(Command::Refresh),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("Unknown command '{}'. Type `help`", other)),
        }
    }

    /// Filter edit for commands that change the filter
    pub fn apply_to(&self, spec: &mut FilterSpec) -> bool {
        match self {
            Command::Search(text) => spec.search = text.clone(),
            Command::Sort(field, None) => spec.select_sort(*field),
            Command::Sort(field, Some(order)) => {
                spec.sort_by = *field;
                spec.sort_order = *order;
            }
            Command::MinFollowers(n) => spec.min_followers = *n,
            Command::MarketCap { min, max } => {
                spec.min_market_cap = *min;
                spec.max_market_cap = *max;
            }
            Command::Reset => *spec = FilterSpec::default(),
            _ => return false,
        }
        true
    }
}

/// Counts like `1000`, `1k`, `5K+`
fn parse_count(raw: &str) -> Result<u64, String> {
    let cleaned = raw.trim().trim_end_matches('+').to_lowercase();
    if cleaned.is_empty() {
        return Ok(0);
    }
    let (digits, multiplier) = match cleaned.strip_suffix('k') {
        Some(digits) => (digits, 1_000),
        None => (cleaned.as_str(), 1),
    };
    digits
        .parse::<u64>()
        .map(|n| n * multiplier)
        .map_err(|_| format!("Invalid follower count '{}'", raw))
}

fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("Invalid market cap '{}'", raw)),
    }
}
