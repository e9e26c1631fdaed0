//! Configuration resolution
//!
//! Overlays parsed configuration documents onto the defaults table,
//! coercing each known key into the type of its [`Settings`] field.

use crate::config::value::{interpolate, parse_bool, parse_list};
use crate::config::{
    host_fqdn, ConfigFile, ConfigSources, IniDocument, Settings, SECTION_GRAPH, SECTION_SMSTRADE,
    SECTION_ZABBIX,
};
use crate::error::ConfigError;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

/// Builds [`Settings`] from a defaults table and configuration sources
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    defaults: Settings,
    fqdn: String,
}

impl ConfigResolver {
    /// Create a resolver. Performs no I/O.
    pub fn new(defaults: Settings, fqdn: impl Into<String>) -> Self {
        Self {
            defaults,
            fqdn: fqdn.into(),
        }
    }

    /// Resolver using this host's name and the compiled-in defaults
    pub fn for_host() -> Self {
        let fqdn = host_fqdn();
        Self::new(Settings::defaults(&fqdn), fqdn)
    }

    /// The defaults this resolver starts from
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    /// Read every candidate of `sources` and apply them to the defaults
    pub fn resolve(&self, sources: &ConfigSources) -> Result<Settings, ConfigError> {
        let document = ConfigFile::load_sources(sources)?;
        self.apply(&document)
    }

    /// Apply an already merged document to the defaults
    pub fn apply(&self, document: &IniDocument) -> Result<Settings, ConfigError> {
        let mut settings = self.defaults.clone();
        let mut reader = SectionReader::new(document, &self.fqdn);

        reader.string(SECTION_ZABBIX, "zabbix_frontend_url", &mut settings.zabbix_frontend_url)?;
        reader.string(SECTION_ZABBIX, "zabbix_password", &mut settings.zabbix_password)?;
        reader.string(SECTION_ZABBIX, "zabbix_username", &mut settings.zabbix_username)?;

        reader.integer(SECTION_GRAPH, "graph_height", &mut settings.graph_height)?;
        reader.integer(SECTION_GRAPH, "graph_period", &mut settings.graph_period)?;
        reader.integer(SECTION_GRAPH, "graph_width", &mut settings.graph_width)?;
        reader.list(SECTION_GRAPH, "graph_ids", &mut settings.graph_ids)?;
        reader.list(SECTION_GRAPH, "smtp_to", &mut settings.smtp_to)?;
        reader.string(SECTION_GRAPH, "smtp_from", &mut settings.smtp_from)?;
        reader.string(SECTION_GRAPH, "smtp_server", &mut settings.smtp_server)?;
        reader.string(SECTION_GRAPH, "smtp_subject", &mut settings.smtp_subject)?;

        reader.boolean(SECTION_SMSTRADE, "smstrade_debug", &mut settings.smstrade_debug)?;
        reader.string(SECTION_SMSTRADE, "smstrade_api_url", &mut settings.smstrade_api_url)?;
        reader.string(SECTION_SMSTRADE, "smstrade_from", &mut settings.smstrade_from)?;
        reader.string(SECTION_SMSTRADE, "smstrade_key", &mut settings.smstrade_key)?;
        reader.string(SECTION_SMSTRADE, "smstrade_route", &mut settings.smstrade_route)?;

        reader.warn_unknown_keys(&[SECTION_ZABBIX, SECTION_GRAPH, SECTION_SMSTRADE]);

        Ok(settings)
    }
}

/// Reads typed values out of a document, remembering which keys it consumed
struct SectionReader<'a> {
    document: &'a IniDocument,
    fqdn: &'a str,
    consumed: BTreeSet<(&'static str, &'static str)>,
}

impl<'a> SectionReader<'a> {
    fn new(document: &'a IniDocument, fqdn: &'a str) -> Self {
        Self {
            document,
            fqdn,
            consumed: BTreeSet::new(),
        }
    }

    fn raw(&mut self, section: &'static str, key: &'static str) -> Option<&'a str> {
        self.consumed.insert((section, key));
        let value = self.document.get(section, key)?;
        log::debug!("Override {}.{} from configuration", section, key);
        Some(value)
    }

    /// Raw value with `%(name)s` references expanded.
    ///
    /// `fqdn` is only offered to string keys; typed keys see their own
    /// section and DEFAULT.
    fn expanded(
        &mut self,
        section: &'static str,
        key: &'static str,
        with_fqdn: bool,
    ) -> Result<Option<String>, ConfigError> {
        let Some(raw) = self.raw(section, key) else {
            return Ok(None);
        };
        let document = self.document;
        let fqdn = self.fqdn;
        let lookup = |name: &str| {
            if with_fqdn && name == "fqdn" {
                Some(fqdn.to_string())
            } else {
                document.get(section, name).map(str::to_string)
            }
        };
        interpolate(raw, &lookup)
            .map(Some)
            .map_err(|message| ConfigError::Interpolation {
                key: format!("{}.{}", section, key),
                message,
            })
    }

    fn string(
        &mut self,
        section: &'static str,
        key: &'static str,
        target: &mut String,
    ) -> Result<(), ConfigError> {
        if let Some(value) = self.expanded(section, key, true)? {
            *target = value;
        }
        Ok(())
    }

    fn integer<T>(
        &mut self,
        section: &'static str,
        key: &'static str,
        target: &mut T,
    ) -> Result<(), ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        if let Some(value) = self.expanded(section, key, false)? {
            *target = value.trim().parse::<T>().map_err(|e| {
                ConfigError::invalid(section, key, format!("'{}' is not a valid integer ({})", value, e))
            })?;
        }
        Ok(())
    }

    fn boolean(
        &mut self,
        section: &'static str,
        key: &'static str,
        target: &mut bool,
    ) -> Result<(), ConfigError> {
        if let Some(value) = self.expanded(section, key, false)? {
            *target = parse_bool(&value).ok_or_else(|| {
                ConfigError::invalid(section, key, format!("'{}' is not a boolean", value))
            })?;
        }
        Ok(())
    }

    fn list(
        &mut self,
        section: &'static str,
        key: &'static str,
        target: &mut Vec<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = self.expanded(section, key, false)? {
            *target = parse_list(&value).map_err(|message| {
                ConfigError::invalid(section, key, format!("'{}' is not a list: {}", value, message))
            })?;
        }
        Ok(())
    }

    fn warn_unknown_keys(&self, sections: &[&str]) {
        for section in sections {
            for key in self.document.keys(section) {
                let known = self
                    .consumed
                    .iter()
                    .any(|(s, k)| s == section && *k == key);
                if !known {
                    log::warn!("Ignoring unknown configuration key {}.{}", section, key);
                }
            }
        }
    }
}
