//! WebSocket connection to the scoreboard server

use futures_util::{SinkExt, StreamExt};
use log::{info, warn};
use shared::{Command, ServerMessage, Snapshot};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// A live observer connection. The same connection carries inbound snapshots
/// and, for operators, outbound commands.
pub struct Connection {
    websocket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Connection {
    pub async fn connect(server: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let url = ws_url(server);
        info!("Connecting to {}", url);

        let (websocket, _) = connect_async(url).await?;
        info!("Connected");

        Ok(Self { websocket })
    }

    /// Waits for the next state snapshot. Unparsable frames are logged and
    /// skipped; `None` means the server is gone.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        while let Some(frame) = self.websocket.next().await {
            match frame {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                    Ok(ServerMessage::StateSync(snapshot)) => return Some(snapshot),
                    Err(e) => warn!("Unparsable server message: {}", e),
                },
                Ok(Message::Close(_)) => return None,
                // Binary, ping and pong frames carry no state.
                Ok(_) => {}
                Err(e) => {
                    warn!("Transport error: {}", e);
                    return None;
                }
            }
        }

        None
    }

    pub async fn send(&mut self, command: &Command) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(command)?;
        self.websocket.send(Message::Text(json)).await?;
        Ok(())
    }
}

/// Accepts both bare `host:port` addresses and full `ws://` URLs.
fn ws_url(server: &str) -> String {
    if server.starts_with("ws://") || server.starts_with("wss://") {
        server.to_string()
    } else {
        format!("ws://{}", server)
    }
}
