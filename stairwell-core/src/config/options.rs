//! Module options
//!
//! Resolves raw host configuration into a [`ModuleConfig`]. All validation
//! happens here, so a bad configuration is rejected before any pin is
//! claimed.

use embassy_time::Duration;
use stairwell_hal::{parse_pin, PinId};

use super::source::{ConfigSource, ConfigValue};
use super::types::{ModuleConfig, Polarity, RelayWiring, DEFAULT_DEBOUNCE_MS};
use crate::error::ConfigError;

/// Invert the sensor reading
pub const OPT_REVERSE: &str = "reverse";
/// Sensor input pin
pub const OPT_SENSOR_GPIO: &str = "sensorGpio";
/// Alternative spelling of [`OPT_SENSOR_GPIO`]
pub const OPT_SENSOR_GPIO_ALIAS: &str = "gpio";
/// Debounce window in milliseconds
pub const OPT_DEBOUNCE: &str = "debounce";
/// Alternative spelling of [`OPT_DEBOUNCE`]
pub const OPT_DEBOUNCE_ALIAS: &str = "debounceTimeout";
/// Primary relay pin
pub const OPT_RELAY_GPIO: &str = "relayGpio";
/// Number of switching points (2 or 4)
pub const OPT_WAYS: &str = "ways";
/// Secondary relay pin, four-way circuits only
pub const OPT_RELAY_GPIO_2: &str = "relayGpio2";

impl ModuleConfig {
    /// Resolve and validate configuration from a host source
    ///
    /// Defaults: `reverse = false`, `debounce = 100`, `ways = 2`.
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let reverse = match source.lookup(OPT_REVERSE) {
            None => false,
            Some(ConfigValue::Bool(b)) => b,
            Some(_) => return Err(ConfigError::InvalidValue(OPT_REVERSE)),
        };

        let sensor_gpio = match lookup_either(source, OPT_SENSOR_GPIO, OPT_SENSOR_GPIO_ALIAS) {
            None => return Err(ConfigError::MissingOption(OPT_SENSOR_GPIO)),
            Some((key, value)) => pin_value(value, key)?,
        };

        let debounce_ms = match lookup_either(source, OPT_DEBOUNCE, OPT_DEBOUNCE_ALIAS) {
            None => DEFAULT_DEBOUNCE_MS,
            Some((_, ConfigValue::Int(ms))) if ms >= 0 => ms as u64,
            Some((key, _)) => return Err(ConfigError::InvalidValue(key)),
        };

        let relay_gpio = match source.lookup(OPT_RELAY_GPIO) {
            None => return Err(ConfigError::MissingOption(OPT_RELAY_GPIO)),
            Some(value) => pin_value(value, OPT_RELAY_GPIO)?,
        };

        let ways = match source.lookup(OPT_WAYS) {
            None => 2,
            Some(ConfigValue::Int(n)) => n,
            Some(ConfigValue::Str(s)) => s
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(OPT_WAYS))?,
            Some(ConfigValue::Bool(_)) => return Err(ConfigError::InvalidValue(OPT_WAYS)),
        };

        let relays = match ways {
            2 => RelayWiring::TwoWay(relay_gpio),
            4 => {
                let secondary = match source.lookup(OPT_RELAY_GPIO_2) {
                    None => return Err(ConfigError::MissingSecondRelay),
                    Some(value) => pin_value(value, OPT_RELAY_GPIO_2)?,
                };
                RelayWiring::FourWay(relay_gpio, secondary)
            }
            n => return Err(ConfigError::UnsupportedWays(n)),
        };

        let config = ModuleConfig {
            polarity: Polarity { reverse },
            sensor_gpio,
            debounce: Duration::from_millis(debounce_ms),
            relays,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that no pin is used for more than one role
    pub fn validate(&self) -> Result<(), ConfigError> {
        let primary = self.relays.primary();

        if primary == self.sensor_gpio {
            return Err(ConfigError::DuplicatePin(primary));
        }
        if let Some(secondary) = self.relays.secondary() {
            if secondary == self.sensor_gpio || secondary == primary {
                return Err(ConfigError::DuplicatePin(secondary));
            }
        }
        Ok(())
    }
}

/// Look up `key`, falling back to `alias`; returns the key that matched
fn lookup_either<'s, S: ConfigSource + ?Sized>(
    source: &'s S,
    key: &'static str,
    alias: &'static str,
) -> Option<(&'static str, ConfigValue<'s>)> {
    source
        .lookup(key)
        .map(|v| (key, v))
        .or_else(|| source.lookup(alias).map(|v| (alias, v)))
}

/// Interpret a value as a pin: an integer or a "gpioN" string
fn pin_value(value: ConfigValue<'_>, key: &'static str) -> Result<PinId, ConfigError> {
    match value {
        ConfigValue::Int(n) => u8::try_from(n)
            .map(PinId)
            .map_err(|_| ConfigError::InvalidValue(key)),
        ConfigValue::Str(s) => parse_pin(s).ok_or(ConfigError::InvalidValue(key)),
        ConfigValue::Bool(_) => Err(ConfigError::InvalidValue(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeyValueConfig, Topology};

    #[test]
    fn test_defaults() {
        let source = KeyValueConfig::new("sensorGpio = 4\nrelayGpio = 17\n");
        let config = ModuleConfig::from_source(&source).unwrap();

        assert_eq!(config.polarity, Polarity::NORMAL);
        assert_eq!(config.sensor_gpio, PinId(4));
        assert_eq!(config.debounce, Duration::from_millis(DEFAULT_DEBOUNCE_MS));
        assert_eq!(config.relays, RelayWiring::TwoWay(PinId(17)));
    }

    #[test]
    fn test_four_way() {
        let source = KeyValueConfig::new(
            "reverse = true\ngpio = \"gpio4\"\ndebounceTimeout = 30\nrelayGpio = 17\nways = 4\nrelayGpio2 = 18\n",
        );
        let config = ModuleConfig::from_source(&source).unwrap();

        assert_eq!(config.polarity, Polarity::REVERSED);
        assert_eq!(config.debounce, Duration::from_millis(30));
        assert_eq!(config.topology(), Topology::FourWay);
        assert_eq!(config.relays, RelayWiring::FourWay(PinId(17), PinId(18)));
    }

    #[test]
    fn test_four_way_without_second_relay() {
        let source = KeyValueConfig::new("sensorGpio = 4\nrelayGpio = 17\nways = 4\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::MissingSecondRelay)
        );
    }

    #[test]
    fn test_two_way_ignores_second_relay() {
        let source = KeyValueConfig::new("sensorGpio = 4\nrelayGpio = 17\nrelayGpio2 = 18\n");
        let config = ModuleConfig::from_source(&source).unwrap();
        assert_eq!(config.relays, RelayWiring::TwoWay(PinId(17)));
    }

    #[test]
    fn test_missing_pins() {
        let source = KeyValueConfig::new("relayGpio = 17\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::MissingOption(OPT_SENSOR_GPIO))
        );

        let source = KeyValueConfig::new("sensorGpio = 4\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::MissingOption(OPT_RELAY_GPIO))
        );
    }

    #[test]
    fn test_unsupported_ways() {
        let source = KeyValueConfig::new("sensorGpio = 4\nrelayGpio = 17\nways = 3\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::UnsupportedWays(3))
        );
    }

    #[test]
    fn test_ways_as_string() {
        let source =
            KeyValueConfig::new("sensorGpio = 4\nrelayGpio = 17\nways = \"4\"\nrelayGpio2 = 18\n");
        let config = ModuleConfig::from_source(&source).unwrap();
        assert_eq!(config.topology(), Topology::FourWay);
    }

    #[test]
    fn test_invalid_values() {
        let source = KeyValueConfig::new("reverse = 1\nsensorGpio = 4\nrelayGpio = 17\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::InvalidValue(OPT_REVERSE))
        );

        let source = KeyValueConfig::new("sensorGpio = 300\nrelayGpio = 17\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::InvalidValue(OPT_SENSOR_GPIO))
        );

        let source = KeyValueConfig::new("gpio = pin4\nrelayGpio = 17\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::InvalidValue(OPT_SENSOR_GPIO_ALIAS))
        );

        let source = KeyValueConfig::new("sensorGpio = 4\nrelayGpio = 17\ndebounce = -5\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::InvalidValue(OPT_DEBOUNCE))
        );
    }

    #[test]
    fn test_duplicate_pins() {
        let source = KeyValueConfig::new("sensorGpio = 4\nrelayGpio = 4\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::DuplicatePin(PinId(4)))
        );

        let source =
            KeyValueConfig::new("sensorGpio = 4\nrelayGpio = 17\nways = 4\nrelayGpio2 = 17\n");
        assert_eq!(
            ModuleConfig::from_source(&source),
            Err(ConfigError::DuplicatePin(PinId(17)))
        );
    }
}
