use super::*;

fn env_config(vars: &[(&str, &str)]) -> EnvironmentConfig {
    envy::from_iter(
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .unwrap()
}

#[test]
fn test_no_color_environment_variable() {
    let color = env_config(&[("NO_COLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_force_color_environment_variable() {
    let color = env_config(&[("FORCE_COLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_environment_variable_precedence() {
    let env = env_config(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);

    // FORCE_COLOR wins over NO_COLOR and CLICOLOR
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_ci_environment_variable() {
    let env = env_config(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorIntent::Always), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let color = env_config(&[("NO_COLOR", "")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let color = env_config(&[("FORCE_COLOR", "invalid")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_clicolor_zero_disables_color() {
    let color = env_config(&[("CLICOLOR", "0")]).apply_color_config(ColorIntent::Always);
    assert_eq!(color, ColorIntent::Never);
}
