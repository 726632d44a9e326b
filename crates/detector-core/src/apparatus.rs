// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Apparatus Assembly
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Parameter-table apparatus assembly.
//!
//! One assembly routine driven by an [`ApparatusConfig`] replaces per-variant
//! construction code: the config lists elements, materials, volumes
//! (parents first) and scorer bindings, and [`build_apparatus`] turns it into
//! a finalized tree plus registry. [`hpge_spectrometer`] is the built-in
//! parameter table for the coaxial germanium spectrometer this family of
//! apparatus models started from.

use std::collections::HashMap;
use std::sync::Arc;

use detector_types::config::{
    ApparatusConfig, MaterialConfig, ScorerConfig, ShapeConfig, VolumeConfig, WorldConfig,
};
use detector_types::error::{DetectorError, DetectorResult};
use log::info;
use nalgebra::{Rotation3, Vector3};

use crate::geometry::{GeometryBuilder, GeometryTree};
use crate::materials::{Isotope, Material, MaterialCatalog};
use crate::scoring::SensitiveDetectorRegistry;
use crate::solids::Solid;

/// The finished model: placement tree plus scorer registry.
#[derive(Debug)]
pub struct Apparatus {
    pub tree: GeometryTree,
    pub registry: SensitiveDetectorRegistry,
}

/// Assemble a complete apparatus from its parameter table.
///
/// Fails on the first invalid entry; no partial model is returned.
pub fn build_apparatus(config: &ApparatusConfig) -> DetectorResult<Apparatus> {
    let mut catalog = MaterialCatalog::new();

    for element in &config.elements {
        let abundances: Vec<(Isotope, f64)> = element
            .isotopes
            .iter()
            .map(|iso| {
                (
                    Isotope::new(&iso.isotope, iso.z, iso.a, iso.molar_mass),
                    iso.abundance,
                )
            })
            .collect();
        catalog.build_element(&element.name, &element.symbol, &abundances)?;
    }

    let mut materials: HashMap<&str, Arc<Material>> = HashMap::new();
    for entry in &config.materials {
        let material = resolve_material(&mut catalog, entry)?;
        materials.insert(entry.name.as_str(), material);
    }

    let mut builder = GeometryBuilder::new();
    let world_material = lookup_material(&materials, &config.world.material)?;
    let world_solid = shape_to_solid(&config.world.name, &config.world.shape)?;
    let world_id = builder.create_world(world_solid, world_material)?;

    let mut handles = HashMap::new();
    handles.insert(config.world.name.as_str(), world_id);

    for volume in &config.volumes {
        let parent_name = volume.parent.as_deref().unwrap_or(&config.world.name);
        let parent = *handles
            .get(parent_name)
            .ok_or_else(|| DetectorError::UnknownParent(parent_name.to_string()))?;
        let material = lookup_material(&materials, &volume.material)?;
        let solid = shape_to_solid(&volume.name, &volume.shape)?;
        let translation = Vector3::new(
            volume.position_cm[0],
            volume.position_cm[1],
            volume.position_cm[2],
        );
        let rotation = volume.rotation_deg.map(|[rx, ry, rz]| {
            Rotation3::from_euler_angles(rx.to_radians(), ry.to_radians(), rz.to_radians())
        });
        let id = builder.place(
            &volume.name,
            solid,
            material,
            volume.sensitive,
            translation,
            rotation,
            parent,
        )?;
        handles.insert(volume.name.as_str(), id);
    }

    let tree = builder.finalize()?;

    let mut registry = SensitiveDetectorRegistry::new();
    for scorer in &config.scorers {
        let id = registry.register_scorer(&scorer.scorer);
        for volume_name in &scorer.volumes {
            registry.bind(volume_name, id, &tree)?;
        }
    }

    info!(
        "assembled apparatus {}: {} placements, {} scorer binding(s)",
        config.apparatus_name,
        tree.len(),
        registry.bound_volumes().count()
    );
    Ok(Apparatus { tree, registry })
}

fn resolve_material(
    catalog: &mut MaterialCatalog,
    entry: &MaterialConfig,
) -> DetectorResult<Arc<Material>> {
    if entry.elements.is_empty() {
        let source = entry.source.as_deref().unwrap_or(&entry.name);
        return catalog.resolve_predefined(source);
    }
    let density = entry
        .density_g_cm3
        .ok_or_else(|| DetectorError::InvalidComposition {
            name: entry.name.clone(),
            reason: "compound material without density".to_string(),
        })?;
    let mut contributions = Vec::with_capacity(entry.elements.len());
    for fraction in &entry.elements {
        let element =
            catalog
                .element(&fraction.element)
                .ok_or_else(|| DetectorError::InvalidComposition {
                    name: entry.name.clone(),
                    reason: format!("unknown element {}", fraction.element),
                })?;
        contributions.push((element, fraction.mass_fraction));
    }
    catalog.build_compound(&entry.name, density, &contributions)
}

fn lookup_material(
    materials: &HashMap<&str, Arc<Material>>,
    name: &str,
) -> DetectorResult<Arc<Material>> {
    materials
        .get(name)
        .map(Arc::clone)
        .ok_or_else(|| DetectorError::UnknownMaterial(name.to_string()))
}

fn shape_to_solid(name: &str, shape: &ShapeConfig) -> DetectorResult<Solid> {
    match *shape {
        ShapeConfig::Box {
            half_x_cm,
            half_y_cm,
            half_z_cm,
        } => Solid::make_box(name, half_x_cm, half_y_cm, half_z_cm),
        ShapeConfig::Tube {
            inner_r_cm,
            outer_r_cm,
            half_height_cm,
            start_angle_deg,
            sweep_deg,
        } => Solid::make_tube(
            name,
            inner_r_cm,
            outer_r_cm,
            half_height_cm,
            start_angle_deg,
            sweep_deg,
        ),
    }
}

fn full_tube(inner_r_cm: f64, outer_r_cm: f64, half_height_cm: f64) -> ShapeConfig {
    ShapeConfig::Tube {
        inner_r_cm,
        outer_r_cm,
        half_height_cm,
        start_angle_deg: 0.0,
        sweep_deg: 360.0,
    }
}

/// Parameter table of the coaxial HPGe gamma spectrometer: an aluminum
/// end cap with lid and base discs, a lithium contact sleeve with lid and
/// base discs around the germanium crystal, in a 1 m cube of air. The
/// crystal is read out by an energy-deposit scorer.
pub fn hpge_spectrometer() -> ApparatusConfig {
    let at_z = |z: f64| [0.0, 0.0, z];
    let volume = |name: &str, shape: ShapeConfig, material: &str, z: f64| VolumeConfig {
        name: name.to_string(),
        shape,
        material: material.to_string(),
        sensitive: false,
        position_cm: at_z(z),
        rotation_deg: None,
        parent: None,
    };

    ApparatusConfig {
        apparatus_name: "hpge-spectrometer".to_string(),
        world: WorldConfig {
            name: "World".to_string(),
            material: "G4_AIR".to_string(),
            shape: ShapeConfig::Box {
                half_x_cm: 50.0,
                half_y_cm: 50.0,
                half_z_cm: 50.0,
            },
        },
        elements: Vec::new(),
        materials: ["G4_AIR", "G4_Al", "G4_Li", "G4_Ge"]
            .iter()
            .map(|name| MaterialConfig {
                name: name.to_string(),
                source: None,
                density_g_cm3: None,
                elements: Vec::new(),
            })
            .collect(),
        volumes: vec![
            volume("AlCapSide", full_tube(3.6, 3.9, 6.22), "G4_Al", 0.0),
            volume("AlCapLid", full_tube(0.0, 3.9, 0.2), "G4_Al", 6.27),
            volume("AlCapBase", full_tube(0.0, 3.9, 0.2), "G4_Al", -6.27),
            volume("LiContactSide", full_tube(2.525, 2.545, 1.0), "G4_Li", 4.8),
            volume("LiContactLid", full_tube(0.0, 2.545, 0.02), "G4_Li", 5.82),
            volume("LiContactBase", full_tube(0.0, 2.545, 0.02), "G4_Li", 3.78),
            VolumeConfig {
                sensitive: true,
                ..volume("GeCrystal", full_tube(0.0, 2.525, 1.0), "G4_Ge", 4.8)
            },
        ],
        scorers: vec![ScorerConfig {
            scorer: "EDep".to_string(),
            volumes: vec!["GeCrystal".to_string()],
        }],
    }
}
