//! Command dispatch
//!
//! Every operation runs on the OpRunner worker, the way the GUI offloads
//! them from its event loop, and the main thread waits on the handle.

use anyhow::{bail, Result};
use app_adb::AdbClient;
use app_core::{AppConfig, OpRunner};
use app_fs::FileManager;
use std::sync::Arc;

pub fn run(config: AppConfig) -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let client = Arc::new(AdbClient::new(config.device.bridge_path.clone()));
    match client.bridge_path() {
        Ok(path) => tracing::info!("Device bridge: {}", path.display()),
        Err(e) => tracing::warn!("{}", e),
    }

    let manager = Arc::new(FileManager::new(client));
    let runner = OpRunner::new();

    match args.first().map(String::as_str) {
        Some("ls") => {
            let path = arg(&args, 1)?;
            let m = Arc::clone(&manager);
            let entries = runner
                .submit(move || m.list_entries(&path))
                .wait()
                .unwrap_or(Ok(Vec::new()))?;

            for entry in entries {
                let marker = if entry.is_dir { "/" } else { "" };
                println!("{}{}", entry.name, marker);
            }
            Ok(())
        }

        Some("devices") => {
            let m = Arc::clone(&manager);
            let devices = runner.submit(move || m.list_devices()).wait().unwrap_or_default();

            for device in devices {
                println!("{}\t{}", device.serial, device.name);
            }
            Ok(())
        }

        Some("cp") => {
            let src = arg(&args, 1)?;
            let dest = arg(&args, 2)?;
            let m = Arc::clone(&manager);
            finish(runner.submit(move || m.copy(&src, &dest)).wait(), "copy")
        }

        Some("mv") => {
            let src = arg(&args, 1)?;
            let dest = arg(&args, 2)?;
            let m = Arc::clone(&manager);
            finish(runner.submit(move || m.move_item(&src, &dest)).wait(), "move")
        }

        Some("rm") => {
            let path = arg(&args, 1)?;
            let m = Arc::clone(&manager);
            finish(runner.submit(move || m.delete(&path)).wait(), "delete")
        }

        Some("rename") => {
            let old = arg(&args, 1)?;
            let new = arg(&args, 2)?;
            let m = Arc::clone(&manager);
            finish(runner.submit(move || m.rename(&old, &new)).wait(), "rename")
        }

        Some("zip") => {
            let archive = arg(&args, 1)?;
            if args.len() < 3 {
                bail!("zip needs at least one input path");
            }
            let inputs = args[2..].to_vec();
            let m = Arc::clone(&manager);
            let ok = runner
                .submit(move || m.compress(&inputs, &archive))
                .wait()
                .unwrap_or(false);

            if !ok {
                bail!("compress failed");
            }
            Ok(())
        }

        Some("fingerprint") => {
            let path = arg(&args, 1)?;
            let m = Arc::clone(&manager);
            let hash = runner.submit(move || m.fingerprint(&path)).wait().unwrap_or(0);
            println!("{}", hash);
            Ok(())
        }

        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn arg(args: &[String], index: usize) -> Result<String> {
    match args.get(index) {
        Some(value) => Ok(value.clone()),
        None => {
            print_usage();
            bail!("missing argument")
        }
    }
}

fn finish(result: Option<app_fs::Result<bool>>, op: &str) -> Result<()> {
    match result {
        Some(Ok(true)) => Ok(()),
        Some(Ok(false)) => bail!("{} failed", op),
        Some(Err(e)) => bail!("{} rejected: {}", op, e),
        None => bail!("{} worker dropped the result", op),
    }
}

fn print_usage() {
    eprintln!(
        "Usage:\n\
         droidfiler ls <path>\n\
         droidfiler devices\n\
         droidfiler cp <src> <dest>\n\
         droidfiler mv <src> <dest>\n\
         droidfiler rm <path>\n\
         droidfiler rename <old> <new>\n\
         droidfiler zip <archive> <input>...\n\
         droidfiler fingerprint <path>\n\n\
         Device paths use the adb://<serial>/<path> form."
    );
}
