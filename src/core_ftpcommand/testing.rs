use crate::config::{FileConfig, FtpConfiguration};
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use std::path::Path;
use tokio::net::{TcpListener, TcpStream};

pub const SAMPLE_FILESYSTEM: &str = r#"
[filesystem]
folder1 = { folder3 = { foo = { ___contents = "bar" } } }
folder2 = { foo = { ___contents = "bar" }, bar = { ___contents = "baz" } }
"#;

pub fn sample_configuration() -> FtpConfiguration {
    FileConfig::from_toml_str(SAMPLE_FILESYSTEM)
        .unwrap()
        .into_configuration()
        .unwrap()
}

/// A tree holding one file, `/real`, backed by `path` on disk.
pub fn real_file_configuration(path: &Path) -> FtpConfiguration {
    let description = format!("[filesystem]\nreal = {{ ___target = '{}' }}\n", path.display());
    FileConfig::from_toml_str(&description)
        .unwrap()
        .into_configuration()
        .unwrap()
}

/// A session wired to a real loopback control connection.
pub struct Harness {
    pub control: ControlChannel,
    pub config: FtpConfiguration,
    pub session: Session,
    client: BufReader<TcpStream>,
}

impl Harness {
    pub async fn new(config: FtpConfiguration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let client = TcpStream::connect(listener.local_addr().unwrap())
            .await
            .unwrap();
        let (server_side, _) = listener.accept().await.unwrap();

        let local_addr = server_side.local_addr().unwrap();
        let peer_addr = server_side.peer_addr().unwrap();
        let (_, writer) = server_side.into_split();
        let control = ControlChannel::new(writer, local_addr, peer_addr);
        let root = config.filesystem.lock().await.root();
        let session = Session::new(&config, root);

        Self {
            control,
            config,
            session,
            client: BufReader::new(client),
        }
    }

    pub async fn send(&mut self, line: &str) {
        self.session
            .handle_line(line, &self.control, &self.config)
            .await
            .unwrap();
    }

    /// Next reply line without its line ending.
    pub async fn reply(&mut self) -> String {
        let mut line = String::new();
        self.client.read_line(&mut line).await.unwrap();
        line.trim_end_matches(&['\r', '\n'][..]).to_string()
    }

    pub async fn read_lines(&mut self, count: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(count);
        for _ in 0..count {
            lines.push(self.reply().await);
        }
        lines
    }

    pub async fn exchange(&mut self, line: &str) -> String {
        self.send(line).await;
        self.reply().await
    }

    /// Sends PASV and returns the announced data port.
    pub async fn enter_passive(&mut self) -> u16 {
        let reply = self.exchange("PASV\r\n").await;
        let fields: Vec<u16> = reply
            .trim_start_matches("227 Entering Passive Mode (")
            .trim_end_matches(')')
            .split(',')
            .map(|field| field.parse().unwrap())
            .collect();
        (fields[4] << 8) + fields[5]
    }

    /// Binds a local listener and announces it with PORT.
    pub async fn enter_active(&mut self) -> TcpListener {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let reply = self
            .exchange(&format!("PORT 127,0,0,1,{},{}\r\n", port >> 8, port & 0xff))
            .await;
        assert_eq!(reply, "200 Defined port");
        listener
    }

    pub async fn at_eof(&mut self) -> bool {
        let mut rest = Vec::new();
        self.client.read_to_end(&mut rest).await.unwrap() == 0
    }
}
