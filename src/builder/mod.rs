mod ec;
mod qr;

pub use ec::{create_bytes, create_data, interleave};
pub use qr::{Module, QRCode};

use tracing::{debug, info};

use crate::common::{
    block::total_data_count,
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};
use crate::error::QRResult;

/// Chained configuration for a single text QR code.
///
/// Version defaults to the smallest that fits, error correction to
/// [`ECLevel::M`] and the mask to the one with the lowest penalty.
pub struct QRBuilder<'a> {
    data: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("None".to_string(), |v| (*v).to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!("{{ Version: {version}, Ec level: {:?}, Mask: {mask} }}", self.ec_level)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QRCode> {
        info!("Generating QR {}...", self.metadata());

        let mut qr = QRCode::new(self.version.map_or(0, |v| *v), self.ec_level)?;
        qr.add_data(self.data);

        match self.mask {
            Some(m) => {
                debug!(mask = *m, "Applying fixed mask");
                qr.make_with_mask(m)?;
            }
            None => qr.make()?,
        }

        // Version and mask are always set once make succeeds
        if let (Some(version), Some(mask)) = (qr.version(), qr.mask_pattern()) {
            let total_modules = qr.module_count() * qr.module_count();
            let dark_modules = qr.count_dark_modules();
            let data_capacity = total_data_count(version, self.ec_level);
            let data_len = qr.segments().iter().map(|s| s.len()).sum::<usize>();
            info!(
                version = *version,
                ec_level = ?self.ec_level,
                mask = *mask,
                data_capacity,
                data_len,
                dark_modules,
                light_modules = total_modules - dark_modules,
                balance = dark_modules * 100 / total_modules,
                "QR generated successfully"
            );
        }

        Ok(qr)
    }
}
