//! Command-line surface.
//!
//! Flags are accepted both as `--route` and as the single-dash `-route`
//! form, with either `=value` or a separate value argument.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::nextrip::NexTripConfig;
use crate::pipeline::DepartureQuery;
use crate::resolve::DirectionMatchPolicy;

/// Printed when a required description is missing.
pub const USAGE: &str =
    r#"Usage:  nextbus -route="" -stop="" -direction=""  (see nextbus -help for more)"#;

/// Long flags that may be written with a single dash.
const LONG_FLAGS: &[&str] = &[
    "route",
    "stop",
    "direction",
    "endpoint",
    "timeout",
    "strict-direction",
    "mock-data",
    "verbose",
    "help",
    "version",
];

/// Look up the next departure for a transit route, direction and stop
#[derive(Debug, Parser)]
#[command(name = "nextbus", version, about, long_about = None)]
pub struct Cli {
    /// Route description, e.g. "Express - Target - Hwy 252 and 73rd Av P&R - Mpls"
    #[arg(long)]
    pub route: Option<String>,

    /// Stop description, e.g. "Target North Campus Building F"
    #[arg(long)]
    pub stop: Option<String>,

    /// Cardinal direction, e.g. "north"
    #[arg(long)]
    pub direction: Option<String>,

    /// API base URL
    #[arg(long, env = "NEXTRIP_BASE_URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds, at least 1 (default: none)
    #[arg(
        long,
        env = "NEXTRIP_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Treat several matching directions as an error instead of taking the last
    #[arg(long)]
    pub strict_direction: bool,

    /// Serve API responses from fixture files in this directory
    #[arg(long, value_name = "DIR")]
    pub mock_data: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse from raw process arguments, accepting single-dash long flags.
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// The lookup to run, or `None` if any description is missing or empty.
    pub fn query(&self) -> Option<DepartureQuery> {
        let non_empty =
            |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(String::from);
        Some(DepartureQuery {
            route: non_empty(&self.route)?,
            direction: non_empty(&self.direction)?,
            stop: non_empty(&self.stop)?,
        })
    }

    /// Runtime configuration selected by the flags.
    pub fn config(&self) -> Config {
        let mut api = NexTripConfig::new();
        if let Some(url) = &self.endpoint {
            api = api.with_base_url(url);
        }
        if let Some(secs) = self.timeout {
            api = api.with_timeout(secs);
        }

        Config {
            api,
            direction_policy: if self.strict_direction {
                DirectionMatchPolicy::Strict
            } else {
                DirectionMatchPolicy::LastMatchWins
            },
            mock_data: self.mock_data.clone(),
        }
    }
}

/// Rewrite `-route=x` style arguments to `--route=x`.
///
/// Only the known long flag names are rewritten, so short flags such as
/// `-vv` pass through untouched. The program name and anything after a
/// bare `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = text
            .strip_prefix('-')
            .filter(|rest| !rest.starts_with('-'))
            .filter(|rest| {
                let name = rest.split_once('=').map_or(*rest, |(name, _)| name);
                LONG_FLAGS.contains(&name)
            })
            .map(|rest| OsString::from(format!("--{rest}")));

        out.push(rewritten.unwrap_or(arg));
    }

    out
}

/// Default log filter for a `-v` count.
pub fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "nextbus=warn",
        1 => "nextbus=info",
        2 => "nextbus=debug",
        _ => "nextbus=trace",
    }
}
