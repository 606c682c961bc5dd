use std::{env, error, fmt, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

pub const BIND_ADDRESS: &str = "LOGISTICS_BIND_ADDRESS";
pub const FIXTURES_DIR: &str = "LOGISTICS_FIXTURES_DIR";
pub const LATENCY_SCALE: &str = "LOGISTICS_LATENCY_SCALE";
pub const SIMULATION_TICK_SECS: &str = "LOGISTICS_SIMULATION_TICK_SECS";
pub const STATIC_DIR: &str = "LOGISTICS_STATIC_DIR";
pub const MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
pub const MAPS_API_KEY_LEGACY: &str = "REACT_APP_GOOGLE_MAPS_API_KEY";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "./resources/www/";
/// upper bound of `LOGISTICS_LATENCY_SCALE`.
pub const MAX_LATENCY_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.variable, self.value)
    }
}

impl error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub bind_address: SocketAddr,
    /// `None` uses the fixtures compiled into the binary.
    pub fixtures_dir: Option<PathBuf>,
    /// multiplier for the simulated latency, 0 answers immediately.
    pub latency_scale: f64,
    /// `None` disables the vehicle simulator.
    pub simulation_tick: Option<Duration>,
    pub static_dir: PathBuf,
    /// handed to the browser for the map widget. Empty if not configured.
    pub maps_api_key: String,
}

fn parse<T: FromStr>(variable: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError { variable, value })
}

impl WebConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| env::var(variable).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address = parse(
            BIND_ADDRESS,
            lookup(BIND_ADDRESS).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned()),
        )?;
        let latency_scale = match lookup(LATENCY_SCALE) {
            Some(value) => {
                let scale: f64 = parse(LATENCY_SCALE, value.clone())?;
                if !(0.0..=MAX_LATENCY_SCALE).contains(&scale) {
                    return Err(ConfigError {
                        variable: LATENCY_SCALE,
                        value,
                    });
                }
                scale
            }
            None => 1.0,
        };
        let simulation_tick = match lookup(SIMULATION_TICK_SECS) {
            Some(value) => {
                let secs: f64 = parse(SIMULATION_TICK_SECS, value.clone())?;
                match Duration::try_from_secs_f64(secs) {
                    Ok(tick) if !tick.is_zero() => Some(tick),
                    _ => {
                        return Err(ConfigError {
                            variable: SIMULATION_TICK_SECS,
                            value,
                        })
                    }
                }
            }
            None => None,
        };

        Ok(Self {
            bind_address,
            fixtures_dir: lookup(FIXTURES_DIR).map(PathBuf::from),
            latency_scale,
            simulation_tick,
            static_dir: lookup(STATIC_DIR)
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned())
                .into(),
            maps_api_key: lookup(MAPS_API_KEY)
                .or_else(|| lookup(MAPS_API_KEY_LEGACY))
                .unwrap_or_default(),
        })
    }
}
