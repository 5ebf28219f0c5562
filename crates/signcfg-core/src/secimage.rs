//! Built-in secimage profile

use signcfg_tree::{ClassName, FieldSchema, FieldType, NodeSchema, Structure, XmlNamespace};

use crate::defines::{ClassNaming, Defines, tags};
use crate::parser::Profile;
use crate::rules::{Rule, RuleSet};

pub const VERSION: &str = "2.0";
pub const CONFIG_DIR_BASENAME: &str = "configs";
pub const XML_NAME_REGEX: &str = r"\w+_secimage\.xml";
pub const XML_ROOT: &str = "secimage";
pub const XML_NAMESPACE_PREFIX: &str = "tns";
pub const XML_NAMESPACE_URI: &str = "http://www.qualcomm.com/secimage";

/// Profile used when no profile file is given.
pub fn profile() -> Profile {
    Profile {
        version: VERSION.to_string(),
        defines: defines(),
        rules: rules(),
    }
}

pub fn defines() -> Defines {
    Defines {
        config_dir_basename: CONFIG_DIR_BASENAME.to_string(),
        xml_name_regex: XML_NAME_REGEX.to_string(),
        xml_root: XML_ROOT.to_string(),
        xml_namespace: XmlNamespace::new(XML_NAMESPACE_PREFIX, XML_NAMESPACE_URI),
        xml_prepend_lines: vec![
            "<!--".to_string(),
            "    Signing profile for one chipset.".to_string(),
            "    general_properties apply to every image unless the image overrides them.".to_string(),
            "-->".to_string(),
        ],
        class_naming: ClassNaming {
            document: ClassName::new("complex_", false),
            object: ClassName::new("Cfg_", true),
        },
        structure: structure(),
    }
}

pub fn structure() -> Structure {
    let string = || FieldType::String;
    let hex = || FieldType::Hex;
    let choice =
        |values: &[&str]| FieldType::Choice(values.iter().map(|v| v.to_string()).collect());

    Structure::new(XML_ROOT)
        .with_kind(
            XML_ROOT,
            NodeSchema::new()
                .field(FieldSchema::required(
                    tags::METADATA,
                    FieldType::Struct(tags::METADATA.into()),
                ))
                .field(FieldSchema::required(
                    tags::GENERAL_PROPERTIES,
                    FieldType::Struct(tags::GENERAL_PROPERTIES.into()),
                ))
                .field(FieldSchema::optional(
                    "post_process",
                    FieldType::Struct("post_process".into()),
                ))
                .field(FieldSchema::required(
                    tags::IMAGES_LIST,
                    FieldType::Struct(tags::IMAGES_LIST.into()),
                )),
        )
        .with_kind(
            tags::METADATA,
            NodeSchema::new()
                .field(FieldSchema::required(tags::CHIPSET, string()))
                .field(FieldSchema::required(tags::VERSION, string())),
        )
        .with_kind(
            tags::GENERAL_PROPERTIES,
            NodeSchema::new()
                .field(FieldSchema::optional(
                    "selected_signer",
                    choice(&["local", "csms", "remote"]),
                ))
                .field(FieldSchema::optional("selected_encryptor", string()))
                .field(FieldSchema::optional("selected_cert_config", string()))
                .field(FieldSchema::optional("cass_capability", string()))
                .field(FieldSchema::optional("key_size", FieldType::Integer))
                .field(FieldSchema::optional("exponent", FieldType::Integer))
                .field(FieldSchema::optional("mask_generation_function", string()))
                .field(FieldSchema::optional(
                    "hash_algorithm",
                    choice(&["sha1", "sha256", "sha384"]),
                ))
                .field(FieldSchema::optional(
                    "segment_hash_algorithm",
                    choice(&["sha1", "sha256", "sha384"]),
                ))
                .field(FieldSchema::optional("dsa_type", choice(&["rsa", "ecdsa"])))
                .field(FieldSchema::optional("rsa_padding", choice(&["pkcs", "pss"])))
                .field(FieldSchema::optional(
                    "ecdsa_curve",
                    choice(&["secp256r1", "secp384r1"]),
                ))
                .field(FieldSchema::optional("num_certs_in_certchain", FieldType::Integer))
                .field(FieldSchema::optional("num_root_certs", FieldType::Integer))
                .field(FieldSchema::optional("max_num_root_certs", FieldType::Integer))
                .field(FieldSchema::optional("msm_part", hex()))
                .field(FieldSchema::optional("oem_id", hex()))
                .field(FieldSchema::optional("model_id", hex()))
                .field(FieldSchema::optional("sw_id", hex()))
                .field(FieldSchema::optional("anti_rollback_version", hex()))
                .field(FieldSchema::optional("soc_hw_version", hex()))
                .field(FieldSchema::optional("soc_vers", string()))
                .field(FieldSchema::optional("debug", hex()))
                .field(FieldSchema::optional("multi_serial_numbers", string()))
                .field(FieldSchema::optional("in_use_soc_hw_version", FieldType::Bool))
                .field(FieldSchema::optional("use_serial_number_in_signing", FieldType::Bool))
                .field(FieldSchema::optional("oem_id_independent", FieldType::Bool))
                .field(FieldSchema::optional("secboot_version", string()))
                .field(FieldSchema::optional("hmac", FieldType::Bool))
                .field(FieldSchema::optional("rot_en", hex()))
                .field(FieldSchema::optional("hw_id", hex()))
                .field(FieldSchema::optional("crash_dump", hex()))
                .field(FieldSchema::optional("app_id", hex()))
                .field(FieldSchema::optional("testsig_serialnum", hex()))
                .field(FieldSchema::optional("object_id", string()))
                .field(FieldSchema::optional("uie_key_switch_enable", hex()))
                .field(FieldSchema::optional("revocation_enablement", hex()))
                .field(FieldSchema::optional("activation_enablement", hex()))
                .field(FieldSchema::optional("root_revoke_activate_enable", hex())),
        )
        .with_kind(
            "post_process",
            NodeSchema::new()
                .field(FieldSchema::optional("pil_splitter", string())),
        )
        .with_kind(
            tags::IMAGES_LIST,
            NodeSchema::new().field(FieldSchema::many(tags::IMAGE, tags::IMAGE)),
        )
        .with_kind(
            tags::IMAGE,
            NodeSchema::new()
                .field(FieldSchema::required(tags::SIGN_ID, string()).as_attribute())
                .field(FieldSchema::optional(tags::NAME, string()).as_attribute())
                .field(FieldSchema::optional("image_type", string()).as_attribute())
                .field(FieldSchema::optional(
                    tags::GENERAL_PROPERTIES_OVERRIDES,
                    FieldType::Struct(tags::GENERAL_PROPERTIES.into()),
                ))
                .field(FieldSchema::optional("meta_build_location", string())),
        )
}

pub fn rules() -> RuleSet {
    RuleSet::new(vec![
        Rule::Pattern {
            field: tags::SIGN_ID.to_string(),
            pattern: "^[A-Za-z0-9_]+$".to_string(),
        },
        Rule::Requires {
            field: "key_size".to_string(),
            requires: "exponent".to_string(),
        },
        Rule::RequiredWhen {
            field: "ecdsa_curve".to_string(),
            when: "dsa_type".to_string(),
            equals: "ecdsa".to_string(),
        },
        Rule::Excludes {
            field: "rsa_padding".to_string(),
            excludes: "ecdsa_curve".to_string(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_is_self_consistent() {
        structure().check().unwrap();
    }

    #[test]
    fn override_block_shares_general_properties_kind() {
        let structure = structure();
        let image = structure.kind(tags::IMAGE).unwrap();
        let field = image.get(tags::GENERAL_PROPERTIES_OVERRIDES).unwrap();
        assert_eq!(field.ty, FieldType::Struct(tags::GENERAL_PROPERTIES.into()));
    }

    #[test]
    fn built_in_rules_compile() {
        assert_eq!(rules().compile().unwrap().len(), 4);
    }
}
