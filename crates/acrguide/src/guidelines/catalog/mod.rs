//! Published guideline definitions grouped by organ system.

mod abdomen;
mod adrenal;
mod breast;
mod kidney;
mod liver;
mod lung;
mod neuro;
mod ovary;
mod pancreas;
mod prostate;
mod spine;
mod thyroid;
mod vascular;

use super::registry::GuidelineDefinition;

/// Every definition in registry order.
pub(crate) fn standard_catalogue() -> Vec<GuidelineDefinition> {
    vec![
        lung::fleischner_solid(),
        lung::fleischner_subsolid(),
        lung::lungrads(),
        thyroid::tirads(),
        thyroid::incidental_thyroid(),
        kidney::bosniak(),
        kidney::renal_mass(),
        liver::lirads(),
        adrenal::adrenal(),
        adrenal::adrenal_washout(),
        pancreas::pancreatic_cyst(),
        breast::birads(),
        ovary::orads(),
        prostate::pirads(),
        prostate::psa_density(),
        spine::incidental_vertebral(),
        spine::incidental_disc(),
        vascular::aortic_aneurysm(),
        vascular::carotid_stenosis(),
        vascular::cac_scoring(),
        neuro::pituitary_incidentaloma(),
        neuro::intracranial_aneurysm(),
        neuro::fazekas(),
        neuro::aspects(),
        neuro::ich_score(),
        abdomen::gallbladder_polyp(),
        abdomen::crads(),
    ]
}
