//! [`SampleConfig`] builder for secimage documents.

/// One `<image>` entry.
#[derive(Debug, Clone, Default)]
pub struct SampleImage {
    pub sign_id: String,
    pub name: Option<String>,
    pub overrides: Vec<(String, String)>,
}

impl SampleImage {
    pub fn new(sign_id: &str) -> Self {
        Self {
            sign_id: sign_id.to_string(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_override(mut self, tag: &str, value: &str) -> Self {
        self.overrides.push((tag.to_string(), value.to_string()));
        self
    }
}

/// Builds secimage markup with a metadata block, general properties and
/// an image list.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    chipset: String,
    version: String,
    properties: Vec<(String, String)>,
    images: Vec<SampleImage>,
}

impl SampleConfig {
    /// Version 2.0 document with sensible general properties and two
    /// images, `sbl1` (named `SBL1`) and `tz` (named `TrustZone`).
    pub fn new(chipset: &str) -> Self {
        Self {
            chipset: chipset.to_string(),
            version: "2.0".to_string(),
            properties: vec![
                ("selected_signer".to_string(), "local".to_string()),
                ("key_size".to_string(), "2048".to_string()),
                ("exponent".to_string(), "3".to_string()),
                ("msm_part".to_string(), "0x0008B0E1".to_string()),
                ("oem_id".to_string(), "0x0000".to_string()),
                ("model_id".to_string(), "0x0000".to_string()),
                ("debug".to_string(), "0x0000000000000002".to_string()),
                ("hash_algorithm".to_string(), "sha256".to_string()),
            ],
            images: vec![
                SampleImage::new("sbl1").named("SBL1"),
                SampleImage::new("tz").named("TrustZone"),
            ],
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Set or replace a general property.
    pub fn property(mut self, tag: &str, value: &str) -> Self {
        match self.properties.iter_mut().find(|(t, _)| t == tag) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.properties.push((tag.to_string(), value.to_string())),
        }
        self
    }

    pub fn without_property(mut self, tag: &str) -> Self {
        self.properties.retain(|(t, _)| t != tag);
        self
    }

    /// Replace the image list.
    pub fn images(mut self, images: Vec<SampleImage>) -> Self {
        self.images = images;
        self
    }

    pub fn image(mut self, image: SampleImage) -> Self {
        self.images.push(image);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        out.push_str(
            "<tns:secimage xmlns:tns=\"http://www.qualcomm.com/secimage\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xsi:schemaLocation=\"http://www.qualcomm.com/secimage ../xsd/secimage.xsd\">\n",
        );
        out.push_str("    <metadata>\n");
        out.push_str(&format!("        <chipset>{}</chipset>\n", self.chipset));
        out.push_str(&format!("        <version>{}</version>\n", self.version));
        out.push_str("    </metadata>\n");

        out.push_str("    <general_properties>\n");
        for (tag, value) in &self.properties {
            out.push_str(&format!("        <{tag}>{value}</{tag}>\n"));
        }
        out.push_str("    </general_properties>\n");

        out.push_str("    <images_list>\n");
        for image in &self.images {
            out.push_str(&format!("        <image sign_id=\"{}\"", image.sign_id));
            if let Some(name) = &image.name {
                out.push_str(&format!(" name=\"{name}\""));
            }
            out.push_str(">\n");
            out.push_str("            <general_properties_overrides>\n");
            for (tag, value) in &image.overrides {
                out.push_str(&format!("                <{tag}>{value}</{tag}>\n"));
            }
            out.push_str("            </general_properties_overrides>\n");
            out.push_str("        </image>\n");
        }
        out.push_str("    </images_list>\n");
        out.push_str("</tns:secimage>\n");
        out
    }
}
