//! Built-in section catalog

use shared::models::{SectionId, SetupSectionConfig};

fn section(
    section_id: SectionId,
    name: &str,
    required: &[&str],
    optional: &[&str],
    dependencies: &[SectionId],
    weight: u32,
    is_active: bool,
) -> SetupSectionConfig {
    SetupSectionConfig {
        section_id,
        name: name.to_string(),
        required_fields: required.iter().map(|f| f.to_string()).collect(),
        optional_fields: optional.iter().map(|f| f.to_string()).collect(),
        dependencies: dependencies.to_vec(),
        weight,
        is_active,
    }
}

/// Full catalog in evaluation order, inactive entries included
pub fn default_sections() -> Vec<SetupSectionConfig> {
    vec![
        section(
            SectionId::Identity,
            "Identidad del estudio",
            &["name", "slug"],
            &["logoUrl", "slogan", "description"],
            &[],
            15,
            true,
        ),
        section(
            SectionId::Contact,
            "Información de contacto",
            &["email"],
            &["phone", "address", "website"],
            &[SectionId::Identity],
            10,
            true,
        ),
        section(
            SectionId::Social,
            "Redes sociales",
            &[],
            &["socialNetworks"],
            &[SectionId::Identity],
            5,
            true,
        ),
        section(
            SectionId::Pricing,
            "Configuración de precios",
            &["configurations.pricing"],
            &[],
            &[],
            20,
            true,
        ),
        section(
            SectionId::CommercialTerms,
            "Condiciones comerciales",
            &["commercialTerms"],
            &[],
            &[SectionId::Pricing],
            10,
            true,
        ),
        section(
            SectionId::Services,
            "Catálogo de servicios",
            &["services"],
            &[],
            &[SectionId::Pricing],
            20,
            true,
        ),
        section(
            SectionId::Team,
            "Equipo",
            &["users"],
            &[],
            &[SectionId::Identity],
            10,
            false,
        ),
        section(
            SectionId::Branding,
            "Marca",
            &["logoUrl"],
            &["slogan"],
            &[SectionId::Identity],
            10,
            false,
        ),
    ]
}

/// Catalog entries with `is_active = true`, order preserved
pub fn active_sections() -> Vec<SetupSectionConfig> {
    default_sections()
        .into_iter()
        .filter(|s| s.is_active)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_weights() {
        let weights: Vec<(SectionId, u32)> = active_sections()
            .into_iter()
            .map(|s| (s.section_id, s.weight))
            .collect();
        assert_eq!(
            weights,
            vec![
                (SectionId::Identity, 15),
                (SectionId::Contact, 10),
                (SectionId::Social, 5),
                (SectionId::Pricing, 20),
                (SectionId::CommercialTerms, 10),
                (SectionId::Services, 20),
            ]
        );
    }

    #[test]
    fn test_catalog_ids_unique_and_weights_positive() {
        let sections = default_sections();
        let ids: HashSet<_> = sections.iter().map(|s| s.section_id.clone()).collect();
        assert_eq!(ids.len(), sections.len());
        assert!(sections.iter().all(|s| s.weight > 0));
    }

    #[test]
    fn test_inactive_sections_filtered() {
        let active = active_sections();
        assert!(active.iter().all(|s| s.is_active));
        assert!(!active.iter().any(|s| s.section_id == SectionId::Team));
        assert!(!active.iter().any(|s| s.section_id == SectionId::Branding));
    }
}
