//! Allows the cast targets to be read from settings.json
//!
//! All the multicast groups, ports, and pacing values have compiled-in
//! defaults that match the speaker fleet deployment.  A settings.json in
//! the working directory can override any of them for bench testing.
use json::JsonValue;
use log::{info, warn};
use regex::Regex;
use std::{
    error::Error,
    fmt,
    fs::File,
    io::{ErrorKind, Write},
};

#[derive(Debug)]
pub struct MissingConfigError {
    key: String,
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Required configuration value '{}' is missing", self.key)
    }
}

impl Error for MissingConfigError {}

pub struct Config {
    filename: String,
    settings: JsonValue,
    defaults: JsonValue,
}

impl Config {
    pub fn build(filename: String, defaults: JsonValue) -> Result<Config, std::io::Error> {
        // Validate filename only contains valid characters and ends in .json
        let filename_regex = Regex::new(r"^[a-zA-Z0-9_\-\.]+\.json$").unwrap();
        if !filename_regex.is_match(&filename) {
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                "Invalid filename - must contain only letters, numbers, underscore, dash, dot and end in .json"
            ));
        }

        let mut config = Config {
            filename,
            settings: json::object! {},
            defaults,
        };

        if let Err(err) = config.load_from_file() {
            warn!("Using default settings: {}", err);
        }

        Ok(config)
    }

    fn load_from_file(&mut self) -> std::io::Result<()> {
        match std::fs::read_to_string(&self.filename) {
            Ok(raw_data) => match json::parse(&raw_data) {
                Ok(parsed) => {
                    self.settings.clone_from(&parsed);
                    info!(
                        "Loaded settings from {}: {}",
                        self.filename,
                        self.settings.pretty(2)
                    );
                    Ok(())
                }
                Err(err) => {
                    warn!("Failed to parse config file {}: {}", self.filename, err);
                    Ok(())
                }
            },
            Err(err) => Err(err),
        }
    }

    pub fn get_str_value(
        &self,
        key: &str,
        default: Option<String>,
    ) -> Result<String, MissingConfigError> {
        // First check settings
        if let Some(val) = self.settings[key].as_str() {
            return Ok(val.to_string());
        }

        // If explicit default is provided, use it
        if let Some(def) = default {
            return Ok(def);
        }

        // Otherwise check defaults
        if let Some(val) = self.defaults[key].as_str() {
            return Ok(val.to_string());
        }

        // If no value found anywhere, return error
        Err(MissingConfigError {
            key: key.to_string(),
        })
    }

    pub fn get_u16_value(&self, key: &str, default: Option<u16>) -> Result<u16, MissingConfigError> {
        if let Some(val) = self.settings[key].as_u16() {
            return Ok(val);
        }

        if let Some(def) = default {
            return Ok(def);
        }

        if let Some(val) = self.defaults[key].as_u16() {
            return Ok(val);
        }

        Err(MissingConfigError {
            key: key.to_string(),
        })
    }

    pub fn get_u32_value(&self, key: &str, default: Option<u32>) -> Result<u32, MissingConfigError> {
        if let Some(val) = self.settings[key].as_u32() {
            return Ok(val);
        }

        if let Some(def) = default {
            return Ok(def);
        }

        if let Some(val) = self.defaults[key].as_u32() {
            return Ok(val);
        }

        Err(MissingConfigError {
            key: key.to_string(),
        })
    }

    pub fn set_value(&mut self, key: &str, val: impl Into<JsonValue>) -> Result<(), String> {
        let json_val = val.into();
        match json_val {
            JsonValue::Short(_)
            | JsonValue::String(_)
            | JsonValue::Boolean(_)
            | JsonValue::Number(_) => {
                self.settings[key] = json_val;
                Ok(())
            }
            _ => Err(format!("Unsupported value type for key: {}", key)),
        }
    }

    pub fn save_settings(&self) -> std::io::Result<bool> {
        let file_open_result = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(self.filename.as_str());
        match file_open_result {
            Ok(mut f) => self.flush_to_file(&mut f),
            Err(error) => {
                // File open failed.  See if we need to create it
                match error.kind() {
                    ErrorKind::NotFound => {
                        let mut f = std::fs::File::create(self.filename.as_str())?;
                        self.flush_to_file(&mut f)
                    }
                    other_error => {
                        panic!("Cannot create settings file: {}", other_error);
                    }
                }
            }
        }
    }

    fn flush_to_file(&self, f: &mut File) -> std::io::Result<bool> {
        f.write_all(self.settings.pretty(2).as_bytes())?;
        f.sync_all()?;
        Ok(true)
    }
}

#[cfg(test)]
mod test_config {

    use super::*;

    fn test_defaults() -> JsonValue {
        json::object! {
            "music_ip": "239.205.155.252",
            "music_port": 9999,
            "chunk_size": 512
        }
    }

    fn test_config(filename: &str) -> Config {
        match Config::build(filename.to_string(), test_defaults()) {
            Ok(config) => config,
            Err(e) => panic!("Failed to build config: {}", e),
        }
    }

    #[test]
    fn should_build_with_any_valid_name() {
        // building from a valid name should work even when the file does not exist
        let config = test_config("no_such_settings.json");
        assert_eq!(config.filename, "no_such_settings.json");
    }

    #[test]
    fn should_error_with_invalid_name() {
        let filename = "I'm_;,`all_{jacked}_up";
        let boom = Config::build(filename.to_string(), test_defaults());
        match boom {
            Ok(_) => assert!(false, "Expected error for invalid filename"),
            Err(e) => assert_eq!(e.kind(), ErrorKind::InvalidInput),
        }
    }

    #[test]
    fn should_get_defaults_with_no_file() {
        let config = test_config("no_such_settings.json");
        assert_eq!(
            config.get_str_value("music_ip", None).unwrap(),
            "239.205.155.252"
        );
        assert_eq!(config.get_u16_value("music_port", None).unwrap(), 9999);
        assert_eq!(config.get_u32_value("chunk_size", None).unwrap(), 512);
    }

    #[test]
    fn get_value_with_explicit_default() {
        let config = test_config("no_such_settings.json");
        assert_eq!(
            config
                .get_str_value("i_dont_exist", Some("fallback".to_string()))
                .unwrap(),
            "fallback"
        );
        assert_eq!(
            config.get_u16_value("i_dont_exist", Some(8000)).unwrap(),
            8000
        );
    }

    #[test]
    fn get_value_explicit_set() {
        // a set value overrides the compiled-in default
        let mut config = test_config("no_such_settings.json");
        config.set_value("music_port", 7777).unwrap();
        assert_eq!(config.get_u16_value("music_port", None).unwrap(), 7777);
    }

    #[test]
    fn get_value_error_on_missing_key() {
        let config = test_config("no_such_settings.json");
        let boom = config.get_str_value("i_dont_exist", None);
        assert_eq!(boom.is_err(), true);
        assert_eq!(
            boom.err().unwrap().to_string(),
            "Required configuration value 'i_dont_exist' is missing"
        );
    }

    #[test]
    fn save_settings_round_trip() {
        // flush a set value to disk and read it back through a fresh config
        let mut config = test_config("save_test_settings.json");
        config.set_value("music_port", 4242).unwrap();
        assert_eq!(config.save_settings().unwrap(), true);
        let reloaded = test_config("save_test_settings.json");
        assert_eq!(reloaded.get_u16_value("music_port", None).unwrap(), 4242);
        let _ = std::fs::remove_file("save_test_settings.json");
    }

    #[test]
    fn set_value_with_unsupported_type() {
        let mut config = test_config("no_such_settings.json");
        let set_result = config.set_value("unsupported", json::array!["a", "b"]);
        assert_eq!(set_result.is_err(), true);
        assert_eq!(
            set_result.err().unwrap(),
            "Unsupported value type for key: unsupported"
        );
    }
}
