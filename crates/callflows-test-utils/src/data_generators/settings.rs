//! Generators for provider/renderer settings.

use callflows_core::{Config, Renderer, Settings};
use std::collections::BTreeMap;

/// Storage key used by the settings fixtures
pub const SETTINGS_FILE_NAME: &str = "callflows-settings.json";

fn config(name: &str, method: &str, template: &str, limit: i32, retries: i32, seconds: i32, allowed: bool) -> Config {
    Config {
        name: name.to_string(),
        outgoing_call_method: method.to_string(),
        outgoing_call_uri_template: template.to_string(),
        outbound_call_limit: limit,
        outbound_call_retry_attempts: retries,
        outbound_call_retry_seconds: seconds,
        call_allowed: allowed,
        ..Default::default()
    }
}

/// Three providers (voxeo, yo, nexmo) and two renderers (vxml, txt).
pub fn default_settings() -> Settings {
    let mut voxeo = config(
        "voxeo",
        "GET",
        "http://session.voxeo.net/SessionControl/4.5.41/VoiceXML.start?tokenid=abc&phonenum=[phone]",
        10,
        3,
        60,
        true,
    );
    voxeo.services_map = BTreeMap::from([("sms".to_string(), "smsService".to_string())]);

    let mut yo = config("yo", "POST", "http://yo.example.com/call?to=[phone]", 5, 1, 30, false);
    yo.outgoing_call_post_headers_map =
        BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]);
    yo.outgoing_call_post_params = "{\"to\":\"[phone]\"}".to_string();

    let nexmo = config("nexmo", "GET", "http://nexmo.example.com/call?to=[phone]", 20, 0, 0, true);

    Settings {
        configs: vec![voxeo, yo, nexmo],
        renderers: vec![
            Renderer {
                name: "vxml".to_string(),
                mime_type: "application/vxml".to_string(),
                template: "<vxml version=\"2.1\">$content</vxml>".to_string(),
            },
            Renderer {
                name: "txt".to_string(),
                mime_type: "text/plain".to_string(),
                template: "$content".to_string(),
            },
        ],
    }
}

/// `settings` serialized the way the settings service reads it
pub fn settings_document(settings: &Settings) -> Vec<u8> {
    serde_json::to_vec_pretty(settings).expect("settings fixture serializes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use callflows_core::SettingsStore;

    #[test]
    fn test_settings_document_loads_back() {
        let document = settings_document(&default_settings());
        assert!(!document.is_empty());

        let store = SettingsStore::from_raw(&document).unwrap();
        assert_eq!(store.settings(), &default_settings());
    }
}
