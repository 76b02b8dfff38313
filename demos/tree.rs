#[macro_use]
extern crate log;

use argh::FromArgs;

use smbfs_adapter::fs::FilesystemAdapter;
use smbfs_adapter::{SmbAdapter, SmbCredentials, SmbOptions, SmbShare};

#[derive(FromArgs)]
#[argh(description = "
where positional can be: [smb://address[:port]]

Prints every file and directory below the root, depth first")]
struct Args {
    #[argh(option, short = 'P', description = "specify password")]
    password: Option<String>,
    #[argh(option, short = 'u', description = "specify username")]
    username: String,
    #[argh(
        option,
        short = 'w',
        default = r#""WORKGROUP".to_string()"#,
        description = "specify workgroup"
    )]
    workgroup: String,
    #[argh(option, short = 's', description = "specify share")]
    share: String,
    #[argh(
        option,
        short = 'r',
        default = "String::new()",
        description = "specify root directory on the share"
    )]
    root: String,
    #[argh(positional, description = "smb://address[:port]")]
    server: String,
}

fn main() -> anyhow::Result<()> {
    assert!(env_logger::builder().try_init().is_ok());
    let args: Args = argh::from_env();
    let password = match &args.password {
        Some(p) => p.clone(),
        None => read_secret_from_tty("Password: ")?,
    };
    let root = args.root.clone();
    let share = init_share(args, password)?;

    info!("connecting to server...");
    share.check_connection()?;
    info!("client connected");

    let adapter = SmbAdapter::new(share, root, |_: &str, _: &[u8]| -> Option<String> { None });
    info!("listing files at {}", adapter.root());
    for entry in adapter.list_contents("", true) {
        let entry = entry?;
        let depth = entry.path().matches('/').count();
        let suffix = if entry.is_dir() { "/" } else { "" };
        println!("{}{}{}", "  ".repeat(depth), entry.path(), suffix);
    }

    Ok(())
}

fn init_share(args: Args, password: String) -> anyhow::Result<SmbShare> {
    info!(
        "initializing client with server {} and share {}, with username {} and workgroup {}",
        args.server, args.share, args.username, args.workgroup
    );
    let share = SmbShare::try_new(
        SmbCredentials::default()
            .server(args.server)
            .share(args.share)
            .username(args.username)
            .password(password)
            .workgroup(args.workgroup),
        SmbOptions::default()
            .one_share_per_server(true)
            .case_sensitive(false),
    )?;

    Ok(share)
}

/// Read a secret from tty with customisable prompt
fn read_secret_from_tty(prompt: &str) -> std::io::Result<String> {
    rpassword::prompt_password(prompt)
}
