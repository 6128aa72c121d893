use crate::config::FtpConfiguration;
use crate::constants::LISTING_TERMINATOR;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_mockfs::{MockFs, NodeId};
use crate::core_network::control::ControlChannel;
use crate::core_network::data::{has_data_target, open_data_connection};
use crate::session::Session;
use log::{error, info, warn};
use tokio::io::AsyncWriteExt;

/// Handles LIST (`detailed`) and NLST.
///
/// An empty argument lists the working directory. A directory lists its
/// children, a file lists itself. LIST sends one `ls -l` style line per
/// entry, NLST only the names.
///
/// # Arguments
///
/// * `control` - The control channel of the client.
/// * `config` - The server configuration holding the shared tree.
/// * `session` - The session owning the data connection setup.
/// * `arg` - The path to list.
/// * `detailed` - Whether to send full lines or bare names.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_list_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    arg: &str,
    detailed: bool,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    let entries = {
        let fs = config.filesystem.lock().await;
        list_entries(&fs, session.cwd(&fs), arg, detailed)
    };

    let entries = match entries {
        Some(entries) => entries,
        None => {
            warn!("LIST on unknown path: {}", arg);
            return control
                .reply(ReplyCode::FileUnavailable, format!("Path {} not found", arg))
                .await;
        }
    };

    if !has_data_target(session) {
        return control
            .reply(ReplyCode::CantOpenDataConnection, "Use PORT or PASV first !")
            .await;
    }

    let mut data_stream = match open_data_connection(control, session).await? {
        Some(stream) => stream,
        None => return Ok(()),
    };

    control
        .reply(ReplyCode::FileStatusOk, "Here comes the directory listing")
        .await?;

    let mut listing = entries.join(LISTING_TERMINATOR);
    listing.push_str(LISTING_TERMINATOR);
    if let Err(e) = data_stream.write_all(listing.as_bytes()).await {
        error!("Error sending listing to client: {}", e);
    }
    if let Err(e) = data_stream.shutdown().await {
        error!("Error shutting down data stream: {}", e);
    }
    info!("Listed {} entries", entries.len());

    control.reply(ReplyCode::FileActionOk, "").await
}

/// Lines for `arg` resolved against `cwd`, `None` when it does not exist.
pub fn list_entries(
    fs: &MockFs,
    cwd: NodeId,
    arg: &str,
    detailed: bool,
) -> Option<Vec<String>> {
    let target = if arg.is_empty() {
        cwd
    } else {
        fs.get(cwd, arg)?
    };
    let node = fs.node(target)?;

    let ids = if node.is_directory() {
        node.children().to_vec()
    } else {
        vec![target]
    };

    Some(
        ids.into_iter()
            .filter_map(|id| {
                if detailed {
                    fs.line_state(id)
                } else {
                    fs.node(id).map(|n| n.name.clone())
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_mockfs::create;
    use chrono::Local;

    fn sample() -> MockFs {
        let description: toml::Table = toml::from_str(
            r#"
folder1 = { folder3 = { foo = { ___contents = "bar" } } }
folder2 = { foo = { ___contents = "bar" }, bar = { ___contents = "baz" } }
"#,
        )
        .unwrap();
        create(&description, "root", Local::now()).unwrap()
    }

    #[test]
    fn test_names_of_directory_and_file() {
        let fs = sample();
        let root = fs.root();
        assert_eq!(
            list_entries(&fs, root, "", false).unwrap(),
            vec!["folder1", "folder2"]
        );
        assert_eq!(
            list_entries(&fs, root, "/folder2", false).unwrap(),
            vec!["foo", "bar"]
        );
        assert_eq!(
            list_entries(&fs, root, "folder2/bar", false).unwrap(),
            vec!["bar"]
        );
        assert_eq!(list_entries(&fs, root, "/folder42", false), None);
    }

    #[test]
    fn test_detailed_lines() {
        let fs = sample();
        let lines = list_entries(&fs, fs.root(), "/folder2", true).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("-rwxrwxrwx 1 1000 1000 3  "));
        assert!(lines[0].ends_with("  foo"));
    }
}
