use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// What a push handler does with a body that is not valid structured data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPayloadPolicy {
    /// The event fails and nothing is displayed.
    #[default]
    Reject,
    /// Log and display the no-payload default notification instead.
    Fallback,
}

impl FromStr for MalformedPayloadPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "fallback" => Ok(Self::Fallback),
            other => Err(anyhow!("expected reject or fallback, got {}", other)),
        }
    }
}

impl fmt::Display for MalformedPayloadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => f.write_str("reject"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WorkerConfig {
    pub event_queue_capacity: usize,
    pub malformed_payload: MalformedPayloadPolicy,
    pub platform_latency_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            event_queue_capacity: 64,
            malformed_payload: MalformedPayloadPolicy::Reject,
            platform_latency_ms: 0,
        }
    }
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests need not
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let event_queue_capacity: usize = env_or_parse(&lookup, "WORKER_EVENT_QUEUE", "64")?;
        if event_queue_capacity == 0 {
            return Err(anyhow!("invalid WORKER_EVENT_QUEUE: must be greater than 0"));
        }

        Ok(Self {
            event_queue_capacity,
            malformed_payload: env_or_parse(&lookup, "PUSH_MALFORMED_PAYLOAD", "reject")?,
            platform_latency_ms: env_or_parse(&lookup, "PLATFORM_LATENCY_MS", "0")?,
        })
    }
}

fn env_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn env_or_parse<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    let value = env_or(lookup, key, default);
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
