use std::error::Error;

use qrmatrix::{ECLevel, QRBuilder, QRCode};

const QUIET_ZONE: i32 = 4;

fn parse_ec_level(arg: Option<&str>) -> Result<ECLevel, Box<dyn Error>> {
    match arg.map(|a| a.to_ascii_uppercase()).as_deref() {
        None | Some("M") => Ok(ECLevel::M),
        Some("L") => Ok(ECLevel::L),
        Some("Q") => Ok(ECLevel::Q),
        Some("H") => Ok(ECLevel::H),
        Some(other) => Err(format!("unknown error correction level {other}, expected L, M, Q or H").into()),
    }
}

fn render(qr: &QRCode) -> Result<String, Box<dyn Error>> {
    let w = qr.module_count() as i32;
    let mut res = String::new();
    for r in -QUIET_ZONE..w + QUIET_ZONE {
        for c in -QUIET_ZONE..w + QUIET_ZONE {
            let inside = (0..w).contains(&r) && (0..w).contains(&c);
            let dark = inside && qr.is_dark(r, c)?;
            res.push_str(if dark { "██" } else { "  " });
        }
        res.push('\n');
    }
    Ok(res)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let data = args.next().unwrap_or_else(|| "Hello, world!".to_string());
    let ec_level = parse_ec_level(args.next().as_deref())?;

    let qr = QRBuilder::new(&data).ec_level(ec_level).build()?;
    print!("{}", render(&qr)?);

    Ok(())
}
