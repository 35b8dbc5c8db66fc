use ecp_client::{ClientConfig, EcpClient, EcpResponse, Transport};
use roku_discovery::DeviceAddress;
use tracing::{debug, trace};
use url::form_urlencoded;

use crate::apps::{parse_active_app, parse_apps, App};
use crate::commander::Commander;
use crate::device_info::{parse_device_info, DeviceInfo};
use crate::keys::{encode_component, KeyAction, KeyInput};
use crate::Result;

/// App id of the built-in TV tuner input
const TUNER_APP_ID: &str = "tvinput.dtv";

/// A client for one Roku device
///
/// Every method issues exactly one HTTP exchange (or, for [`send_text`], one
/// per character) and returns once it has finished, so calls made through the
/// same client are strictly sequential. Nothing is retried.
///
/// ```rust,ignore
/// use roku_api::RokuClient;
///
/// let device = roku_discovery::discover_one(roku_discovery::DEFAULT_TIMEOUT)?;
/// let client = RokuClient::new(device);
///
/// for app in client.apps()? {
///     println!("{} {}", app.id, app.name);
/// }
/// client.command().home().down_times(2).select().send()?;
/// ```
///
/// [`send_text`]: RokuClient::send_text
#[derive(Debug, Clone)]
pub struct RokuClient<T: Transport = EcpClient> {
    address: DeviceAddress,
    transport: T,
}

impl RokuClient<EcpClient> {
    /// Create a client using the default HTTP transport
    pub fn new(address: DeviceAddress) -> Self {
        Self::with_transport(address, EcpClient::new())
    }

    pub fn with_config(address: DeviceAddress, config: &ClientConfig) -> Self {
        Self::with_transport(address, EcpClient::with_config(config))
    }
}

impl<T: Transport> RokuClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(address: DeviceAddress, transport: T) -> Self {
        Self { address, transport }
    }

    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// List installed applications, in the order the device reports them
    pub fn apps(&self) -> Result<Vec<App>> {
        let body = self.get("query/apps")?.into_string()?;
        parse_apps(&body)
    }

    /// The application in the foreground, or `None` on the home screen
    pub fn active_app(&self) -> Result<Option<App>> {
        let url = self.address.endpoint("query/active-app");
        let body = self.transport.get(&url)?.into_string()?;
        parse_active_app(&body, &url)
    }

    pub fn device_info(&self) -> Result<DeviceInfo> {
        let body = self.get("query/device-info")?.into_string()?;
        parse_device_info(&body)
    }

    /// Fetch an application's icon. The image body is handed over unread.
    pub fn icon(&self, app_id: &str) -> Result<Icon> {
        let response = self.get(&format!("query/icon/{}", encode_component(app_id)))?;
        Ok(Icon::new(response))
    }

    pub fn launch(&self, app_id: &str) -> Result<()> {
        self.post(&format!("launch/{}", encode_component(app_id)))
    }

    /// Launch an application with deep-link parameters such as `contentId`
    /// and `mediaType`
    pub fn launch_with<K, V>(&self, app_id: &str, params: &[(K, V)]) -> Result<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let path = format!("launch/{}", encode_component(app_id));
        if params.is_empty() {
            return self.post(&path);
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
            .finish();
        self.post(&format!("{}?{}", path, query))
    }

    /// Switch to the TV tuner, optionally tuning to `channel` (e.g. `"2.1"`)
    pub fn launch_tuner(&self, channel: Option<&str>) -> Result<()> {
        match channel {
            Some(channel) => self.launch_with(TUNER_APP_ID, &[("ch", channel)]),
            None => self.launch(TUNER_APP_ID),
        }
    }

    /// Press and release a key
    pub fn keypress(&self, key: impl Into<KeyInput>) -> Result<()> {
        self.key_event(KeyAction::Press, key.into())
    }

    /// Press a key without releasing it
    pub fn keydown(&self, key: impl Into<KeyInput>) -> Result<()> {
        self.key_event(KeyAction::Down, key.into())
    }

    pub fn keyup(&self, key: impl Into<KeyInput>) -> Result<()> {
        self.key_event(KeyAction::Up, key.into())
    }

    /// Type `text` one character at a time, stopping at the first failure
    pub fn send_text(&self, text: &str) -> Result<()> {
        debug!(chars = text.chars().count(), "Sending text");
        for c in text.chars() {
            self.keypress(c)?;
        }
        Ok(())
    }

    /// Start a command chain against this device
    pub fn command(&self) -> Commander<'_, T> {
        Commander::new(self)
    }

    fn key_event(&self, action: KeyAction, input: KeyInput) -> Result<()> {
        trace!(action = action.verb(), key = %input, "Key event");
        self.post(&format!("{}/{}", action.verb(), input.command()))
    }

    fn get(&self, path: &str) -> Result<EcpResponse> {
        Ok(self.transport.get(&self.address.endpoint(path))?)
    }

    fn post(&self, path: &str) -> Result<()> {
        Ok(self.transport.post(&self.address.endpoint(path))?)
    }
}

/// An application icon as returned by `query/icon/{id}`
#[derive(Debug)]
pub struct Icon {
    /// Media type without parameters, e.g. `image/png`
    pub mime_type: Option<String>,
    /// File extension matching the media type, e.g. `png`, `jpg`, `svg`
    pub extension: Option<String>,
    /// The unread response; the caller owns the body
    pub response: EcpResponse,
}

impl Icon {
    fn new(response: EcpResponse) -> Self {
        let mime_type = response.content_type().and_then(mime_essence);
        let extension = mime_type.as_deref().and_then(extension_for);
        Self {
            mime_type,
            extension,
            response,
        }
    }

    /// Read the whole image into memory
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        Ok(self.response.into_bytes()?)
    }
}

/// `image/PNG; charset=x` -> `image/png`
fn mime_essence(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim();
    if essence.is_empty() {
        None
    } else {
        Some(essence.to_ascii_lowercase())
    }
}

/// `image/jpeg` -> `jpg`, `image/svg+xml` -> `svg`
fn extension_for(mime_type: &str) -> Option<String> {
    let (_, subtype) = mime_type.split_once('/')?;
    let subtype = subtype.split('+').next()?;
    match subtype {
        "" => None,
        "jpeg" | "pjpeg" => Some("jpg".to_string()),
        other => Some(other.to_string()),
    }
}
