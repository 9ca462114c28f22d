//! Header and footer templates
//!
//! Templates are plain text with `{PLACEHOLDER}` markers that the assembler
//! substitutes once per run. The default template also carries the sentinel
//! comments the idempotence detector and the legacy stripper key on.

use serde::{Deserialize, Serialize};

/// Header placeholder: input file name without extension
pub const FILENAME: &str = "{FILENAME}";
/// Header placeholder: local date and time of the run
pub const DATE: &str = "{DATE}";
/// Header placeholder: material display name
pub const MATERIAL: &str = "{MATERIAL}";
/// Header placeholder: nominal feed rate in mm/min
pub const FEED_RATE: &str = "{FEED_RATE}";

/// Footer placeholder: total path length (mm, 2 decimals)
pub const TOTAL_DISTANCE: &str = "{TOTAL_DISTANCE}";
/// Footer placeholder: cutting time as "N minutos e M segundos"
pub const ESTIMATED_TIME: &str = "{ESTIMATED_TIME}";
/// Footer placeholder: number of body lines
pub const TOTAL_COMMANDS: &str = "{TOTAL_COMMANDS}";
/// Footer placeholder: number of dwells inserted
pub const TOTAL_PAUSES: &str = "{TOTAL_PAUSES}";
/// Footer placeholder: short tier dwells
pub const SHORT_PAUSES: &str = "{SHORT_PAUSES}";
/// Footer placeholder: medium tier dwells
pub const MEDIUM_PAUSES: &str = "{MEDIUM_PAUSES}";
/// Footer placeholder: long tier dwells
pub const LONG_PAUSES: &str = "{LONG_PAUSES}";
/// Footer placeholder: sum of dwell durations (seconds, 1 decimal)
pub const PAUSE_SECONDS: &str = "{PAUSE_SECONDS}";

/// Sentinel comment opening the cut section
pub const START_OF_CUT_MARKER: &str = "=== INICIO DO CORTE ===";
/// Sentinel comment opening the statistics block
pub const STATISTICS_MARKER: &str = "=== ESTATISTICAS ===";

const DEFAULT_HEADER: &str = "; Projeto: {FILENAME}
; Data: {DATE}
; Tipo de EPS: {MATERIAL}
; Feed Rate: {FEED_RATE} mm/min

; === INICIO DO CORTE ===
G90             ; Modo absoluto
G92 X0 Y0       ; Zera a origem
F{FEED_RATE}    ; Velocidade base";

const DEFAULT_FOOTER: &str = "

; === FINALIZACAO ===
; Fim do programa

; === ESTATISTICAS ===
; Total de pontos G01 validos: {TOTAL_COMMANDS}
; Distancia total: {TOTAL_DISTANCE} mm
; Tempo de corte: {ESTIMATED_TIME}
; Tempo de pausas: {PAUSE_SECONDS} segundos



; G-CODE gerado por:
; Danilo Pellens / ELEVA DIGITAL MIDIA / WhatsApp: (41)99921-7821
;
;FIM";

const FACTORY_HEADER: &str = "; Projeto: {FILENAME}
; Data: {DATE}
; Tipo de EPS: T1
; Feed Rate: 600 mm/min

; === INICIO DO CORTE ===
G90             ; Modo absoluto
G92 X0 Y0       ; Zera a origem
F600            ; Velocidade base";

const FACTORY_FOOTER: &str = "

; === FINALIZACAO ===
; Fim do programa

; === ESTATISTICAS ===
; Total de pontos G01 validos: {TOTAL_COMMANDS}
; Distancia total: {TOTAL_DISTANCE} mm
; Tempo estimado: {ESTIMATED_TIME}
; Tempo de pausas: {PAUSE_SECONDS} segundos

; G-CODE gerado por:
; Danilo Pellens / ELEVA DIGITAL MIDIA / WhatsApp: (41)99921-7821
;
;FIM";

/// Header/footer pair wrapped around the processed body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub header: String,
    pub footer: String,
}

impl Template {
    pub fn new(header: impl Into<String>, footer: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            footer: footer.into(),
        }
    }

    /// Fixed-material template shipped as the factory reset value
    pub fn factory() -> Self {
        Self::new(FACTORY_HEADER, FACTORY_FOOTER)
    }

    /// Whether the template carries both sentinels needed to recognise its
    /// own output on resubmission
    pub fn has_sentinels(&self) -> bool {
        let all = format!("{}\n{}", self.header, self.footer);
        all.contains(START_OF_CUT_MARKER) && all.contains(STATISTICS_MARKER)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER, DEFAULT_FOOTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_placeholders() {
        let t = Template::default();
        for p in [FILENAME, DATE, MATERIAL, FEED_RATE] {
            assert!(t.header.contains(p), "header missing {p}");
        }
        for p in [TOTAL_COMMANDS, TOTAL_DISTANCE, ESTIMATED_TIME, PAUSE_SECONDS] {
            assert!(t.footer.contains(p), "footer missing {p}");
        }
        assert!(t.has_sentinels());
    }

    #[test]
    fn test_factory_template_is_fixed_material() {
        let t = Template::factory();
        assert!(!t.header.contains(MATERIAL));
        assert!(t.header.contains("F600"));
        assert!(t.has_sentinels());
    }

    #[test]
    fn test_custom_template_without_sentinels() {
        let t = Template::new("G90", "M30");
        assert!(!t.has_sentinels());
    }
}
