pub fn about() -> Vec<String> {
    vec![
        "A four-zone indicator sweep panel: configure each zone's activation \
        time and visitation order, then enable run mode to cycle the \
        indicators against the running clock.".to_string(),
        "\n".to_string(),
        "Every 60 seconds of running time the sweep is interrupted for one \
        clean pass before the cycle restarts.".to_string(),
        "License: GNU General Public License v3.0".to_string(),
    ]
}
