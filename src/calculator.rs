use crate::config::{Region, UsageProfile};
use crate::model::InferenceCost;

const JOULES_PER_KWH: f64 = 3_600_000.0;

/// Cost of a single inference with explicit token sizes
///
/// Two-phase time model: prefill is super-linear in input size (the squared
/// term approximates quadratic attention cost over the prompt), decode is
/// linear in output size since tokens are generated sequentially at fixed
/// throughput. PUE multiplies IT-equipment energy to account for data-center
/// overhead. All arithmetic stays in f64 with no rounding; presentation-time
/// rounding belongs to adapters.
pub fn inference_cost(
    input_tokens: f64,
    output_tokens: f64,
    profile: &UsageProfile,
    region: &Region,
) -> InferenceCost {
    let hardware = &profile.hardware;

    let time_seconds = (input_tokens * input_tokens + output_tokens)
        / profile.throughput_tokens_per_second;

    let it_power_watts = hardware.gpu_power_watts * hardware.gpu_efficiency
        + hardware.cpu_power_watts * hardware.cpu_efficiency;
    let energy_joules = it_power_watts * time_seconds * region.power_usage_effectiveness;

    let energy_kwh = energy_joules / JOULES_PER_KWH;
    let carbon_gco2e = energy_kwh * region.carbon_intensity_gco2e_per_kwh;

    InferenceCost {
        time_seconds,
        energy_kwh,
        carbon_gco2e,
    }
}

/// Cost of a single inference using the profile's configured average sizes
pub fn profile_cost(profile: &UsageProfile, region: &Region) -> InferenceCost {
    inference_cost(
        profile.average_input_tokens,
        profile.average_output_tokens,
        profile,
        region,
    )
}
