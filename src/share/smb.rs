//! # smb share
//!
//! Share client backed by libsmbclient

use std::io::{Read, Write};

use libc::mode_t;
pub use pavao::{SmbClient, SmbCredentials, SmbEncryptionLevel, SmbOptions, SmbShareMode};
use pavao::{SmbDirentType, SmbMode, SmbOpenOptions};
use remotefs::{File, RemoteError, RemoteErrorType, RemoteResult};

use super::ShareClient;
use crate::utils::smb as smb_utils;

const DIR_MODE: mode_t = 0o755;
const FILE_MODE: mode_t = 0o644;

/// SMB share client
pub struct SmbShare {
    client: SmbClient,
}

impl SmbShare {
    /// Try to create a new `SmbShare`.
    /// Fails if it is not possible to instantiate a smb context.
    pub fn try_new(credentials: SmbCredentials, options: SmbOptions) -> RemoteResult<Self> {
        Ok(Self {
            client: SmbClient::new(credentials, options)
                .map_err(|e| RemoteError::new_ex(RemoteErrorType::BadAddress, e))?,
        })
    }

    /// Return a reference to the inner `pavao::SmbClient`
    pub fn client(&self) -> &SmbClient {
        &self.client
    }

    /// Check whether the share can be reached with the configured credentials
    pub fn check_connection(&self) -> RemoteResult<()> {
        trace!("checking connection...");
        match self.client.get_user() {
            Err(e) => {
                error!("connection ERROR: {}", e);
                Err(RemoteError::new_ex(RemoteErrorType::ConnectionError, e))
            }
            Ok(_) => {
                trace!("connection OK");
                Ok(())
            }
        }
    }
}

impl ShareClient for SmbShare {
    fn stat(&self, path: &str) -> RemoteResult<File> {
        self.check_connection()?;
        trace!("get stat for {}", path);
        self.client
            .stat(path)
            .map_err(|e| smb_utils::smb_error(e, RemoteErrorType::StatFailed))
            .map(|stat| smb_utils::smbstat_to_file(path, stat))
    }

    fn read(&self, path: &str) -> RemoteResult<Box<dyn Read + '_>> {
        self.check_connection()?;
        trace!("opening file at {} for read", path);
        let file = self
            .client
            .open_with(path, SmbOpenOptions::default().read(true))
            .map_err(|e| smb_utils::smb_error(e, RemoteErrorType::CouldNotOpenFile))?;
        Ok(Box::new(file))
    }

    fn write(&self, path: &str) -> RemoteResult<Box<dyn Write + '_>> {
        self.check_connection()?;
        trace!("opening file at {} for write", path);
        let file = self
            .client
            .open_with(
                path,
                SmbOpenOptions::default()
                    .create(true)
                    .truncate(true)
                    .write(true)
                    .mode(FILE_MODE),
            )
            .map_err(|e| smb_utils::smb_error(e, RemoteErrorType::CouldNotOpenFile))?;
        Ok(Box::new(file))
    }

    fn del(&self, path: &str) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("removing file {}", path);
        self.client
            .unlink(path)
            .map_err(|e| smb_utils::smb_error(e, RemoteErrorType::CouldNotRemoveFile))
    }

    fn rmdir(&self, path: &str) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("removing directory at {}", path);
        self.client
            .rmdir(path)
            .map_err(|e| smb_utils::smb_error(e, RemoteErrorType::CouldNotRemoveFile))
    }

    fn mkdir(&self, path: &str) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("making directory at {}", path);
        self.client
            .mkdir(path, SmbMode::from(DIR_MODE))
            .map_err(|e| smb_utils::smb_error(e, RemoteErrorType::FileCreateDenied))
    }

    fn rename(&self, from: &str, to: &str) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("moving {} to {}", from, to);
        self.client
            .rename(from, to)
            .map_err(|e| smb_utils::smb_error(e, RemoteErrorType::ProtocolError))
    }

    fn dir(&self, path: &str) -> RemoteResult<Vec<File>> {
        self.check_connection()?;
        trace!("listing files at {}", path);
        let dirents = self
            .client
            .list_dir(path)
            .map_err(|e| smb_utils::smb_error(e, RemoteErrorType::StatFailed))?;
        let parent = path.trim_end_matches('/');
        // stat each dirent (NOTE: KEEP ONLY FILES AND DIRECTORIES)
        dirents
            .into_iter()
            .filter(|d| d.get_type() == SmbDirentType::File || d.get_type() == SmbDirentType::Dir)
            .filter(|d| d.name() != "." && d.name() != "..")
            .map(|d| self.stat(&format!("{}/{}", parent, d.name())))
            .collect()
    }
}
