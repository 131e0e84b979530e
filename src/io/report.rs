use crate::integrals::IntegralResult;
use tracing::info;

pub fn report_summary(result: &IntegralResult) {
    info!("\nIntegral calculation finished.");
    info!(
        "  Basis: {}  Method: {}  Orbitals: {}",
        result.basis, result.hf_method, result.num_orbitals
    );
    info!(
        "  Charge: {}  Multiplicity: {}  Electrons: {} alpha, {} beta",
        result.molecular_charge, result.multiplicity, result.num_alpha, result.num_beta
    );

    info!("\nGeometry (Bohr):");
    for (idx, atom) in result.atoms.iter().enumerate() {
        info!(
            "  Atom {:>2} {:>2}: [{:+.6}, {:+.6}, {:+.6}]",
            idx + 1,
            atom.symbol,
            atom.xyz[0],
            atom.xyz[1],
            atom.xyz[2]
        );
    }

    info!("\nOrbital Energies:");
    for (i, energy) in result.orbital_energies.iter().enumerate() {
        info!("  Level {}: {:.8} au", i + 1, energy);
    }

    info!("\nNuclear repulsion energy: {:.10} au", result.nuclear_repulsion_energy);
    info!("Hartree-Fock Total Energy: {:.10} au", result.hf_energy);
}
