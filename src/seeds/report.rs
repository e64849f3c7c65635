//! Human-readable rendering of seeding and verification results.

use std::fmt;

use super::seeder::{RunReport, SeedSummary, Verification};
use super::store::{CatalogLabels, ParentBreakdown};

fn lower(label: &str) -> String {
    label.to_lowercase()
}

fn created(feminine: bool, singular: bool) -> String {
    CatalogLabels::participle(feminine, singular, "cread")
}

fn active(feminine: bool) -> String {
    CatalogLabels::participle(feminine, false, "activ")
}

/// Writes `"  • Tecnología: 7 cargos (A, B, C, …)"`.
fn write_breakdown_line(
    f: &mut fmt::Formatter<'_>,
    labels: &CatalogLabels,
    parent: &ParentBreakdown,
) -> fmt::Result {
    write!(
        f,
        "  • {}: {} {}",
        parent.name,
        parent.child_count,
        lower(labels.child_plural)
    )?;
    if !parent.preview.is_empty() {
        write!(f, " ({}", parent.preview.join(", "))?;
        if parent.remaining() > 0 {
            write!(f, ", …")?;
        }
        write!(f, ")")?;
    }
    writeln!(f)
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = &self.labels;

        if let Some(cleared) = self.cleared {
            writeln!(f, "🗑️  Limpiando datos existentes...")?;
            writeln!(
                f,
                "  • {} eliminados: {}, {} eliminados: {}",
                labels.child_plural, cleared.children, labels.parent_plural, cleared.parents
            )?;
        }

        writeln!(
            f,
            "{} Creando {}...",
            labels.parent_icon,
            lower(labels.parent_plural)
        )?;
        for parent in &self.parents {
            if parent.created {
                writeln!(
                    f,
                    "  ✅ {} {}: {}",
                    labels.parent_singular,
                    created(labels.parent_feminine, true),
                    parent.name
                )?;
            } else {
                writeln!(
                    f,
                    "  ⚠️  {} ya existía: {}",
                    labels.parent_singular, parent.name
                )?;
            }
        }

        writeln!(
            f,
            "{} Creando {}...",
            labels.child_icon,
            lower(labels.child_plural)
        )?;
        for child in &self.children {
            if child.created {
                writeln!(
                    f,
                    "  ✅ {} {}: {} ({})",
                    labels.child_singular,
                    created(labels.child_feminine, true),
                    child.name,
                    child.parent
                )?;
            } else {
                writeln!(
                    f,
                    "  ⚠️  {} ya existía: {} ({})",
                    labels.child_singular, child.name, child.parent
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "🎉 ¡Carga completada exitosamente!")?;
        writeln!(f, "📊 Resumen:")?;
        writeln!(
            f,
            "  • {} procesad{}: {}",
            labels.parent_plural,
            if labels.parent_feminine { "as" } else { "os" },
            self.parents_processed()
        )?;
        writeln!(
            f,
            "  • {} {}: {}",
            labels.parent_plural,
            created(labels.parent_feminine, false),
            self.parents_created()
        )?;
        writeln!(
            f,
            "  • {} procesad{}: {}",
            labels.child_plural,
            if labels.child_feminine { "as" } else { "os" },
            self.children_processed()
        )?;
        writeln!(
            f,
            "  • {} {}: {}",
            labels.child_plural,
            created(labels.child_feminine, false),
            self.children_created()
        )?;

        if !self.breakdown.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "📈 Estadísticas por {}:",
                lower(labels.parent_singular)
            )?;
            for parent in &self.breakdown {
                write_breakdown_line(f, labels, parent)?;
            }
        }

        if !self.extra.is_empty() {
            writeln!(f)?;
            writeln!(f, "📊 Estadísticas finales:")?;
            for line in &self.extra {
                writeln!(f, "  • {}: {}", line.label, line.value)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = &self.labels;
        let counts = &self.counts;

        writeln!(f, "🔍 Verificando datos cargados...")?;
        writeln!(f, "📊 Estado actual de la base de datos:")?;
        writeln!(
            f,
            "  • Total {}: {} ({} {})",
            lower(labels.parent_plural),
            counts.total_parents,
            counts.active_parents,
            active(labels.parent_feminine)
        )?;
        match counts.active_children {
            Some(active_children) => writeln!(
                f,
                "  • Total {}: {} ({} {})",
                lower(labels.child_plural),
                counts.total_children,
                active_children,
                active(labels.child_feminine)
            )?,
            None => writeln!(
                f,
                "  • Total {}: {} (sin indicador de activo)",
                lower(labels.child_plural),
                counts.total_children
            )?,
        }

        if self.is_warning() {
            writeln!(
                f,
                "⚠️  No hay datos suficientes. Ejecuta el comando sin --verify-only para cargar datos."
            )?;
            return Ok(());
        }

        writeln!(f)?;
        writeln!(
            f,
            "📋 Ejemplo de {} y {}:",
            lower(labels.parent_plural),
            lower(labels.child_plural)
        )?;
        for parent in &self.samples {
            writeln!(f, "  {} {}", labels.parent_icon, parent.name)?;
            for child in &parent.preview {
                writeln!(f, "    {} {}", labels.child_icon, child)?;
            }
            if parent.remaining() > 0 {
                writeln!(f, "    ... y {} más", parent.remaining())?;
            }
        }

        writeln!(f)?;
        writeln!(f, "✅ Datos verificados correctamente!")
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.verification.labels.title;
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "{title}")?;
        writeln!(f, "{rule}")?;

        if let Some(seed) = &self.seed {
            write!(f, "{seed}")?;
            writeln!(f)?;
        }
        write!(f, "{}", self.verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::store::{CatalogCounts, ClearedRecords, ResolvedParent, StatLine};
    use crate::seeds::seeder::ChildOutcome;
    use uuid::Uuid;

    const LABELS: CatalogLabels = CatalogLabels {
        title: "TEST",
        parent_singular: "Área",
        parent_plural: "Áreas",
        child_singular: "Cargo",
        child_plural: "Cargos",
        parent_feminine: true,
        child_feminine: false,
        parent_icon: "🏢",
        child_icon: "👔",
    };

    fn breakdown(name: &str, count: u64) -> ParentBreakdown {
        ParentBreakdown {
            name: name.to_string(),
            child_count: count,
            preview: (0..count.min(3)).map(|i| format!("{name}-{i}")).collect(),
        }
    }

    #[test]
    fn verification_lists_remaining_children() {
        let verification = Verification {
            labels: LABELS,
            counts: CatalogCounts {
                total_parents: 7,
                active_parents: 7,
                total_children: 32,
                active_children: Some(32),
            },
            samples: vec![breakdown("Administración", 4), breakdown("Finanzas", 2)],
        };

        let text = verification.to_string();
        assert!(text.contains("Total áreas: 7 (7 activas)"));
        assert!(text.contains("Total cargos: 32 (32 activos)"));
        assert!(text.contains("... y 1 más"));
        assert_eq!(text.matches("más").count(), 1);
        assert!(text.contains("Datos verificados correctamente"));
    }

    #[test]
    fn empty_verification_prints_warning_only() {
        let verification = Verification {
            labels: LABELS,
            counts: CatalogCounts {
                total_parents: 3,
                active_parents: 3,
                total_children: 0,
                active_children: None,
            },
            samples: Vec::new(),
        };

        let text = verification.to_string();
        assert!(text.contains("No hay datos suficientes"));
        assert!(text.contains("sin indicador de activo"));
        assert!(!text.contains("Ejemplo de"));
    }

    #[test]
    fn summary_reports_created_and_existing() {
        let summary = SeedSummary {
            labels: LABELS,
            cleared: Some(ClearedRecords {
                parents: 1,
                children: 2,
            }),
            parents: vec![
                ResolvedParent {
                    id: Uuid::new_v4(),
                    name: "Ventas".to_string(),
                    created: true,
                },
                ResolvedParent {
                    id: Uuid::new_v4(),
                    name: "Finanzas".to_string(),
                    created: false,
                },
            ],
            children: vec![ChildOutcome {
                parent: "Ventas".to_string(),
                name: "Asesor Comercial".to_string(),
                created: true,
            }],
            breakdown: vec![breakdown("Tecnología", 7)],
            extra: vec![StatLine::new("Total eventos", 0)],
        };

        let text = summary.to_string();
        assert!(text.contains("Limpiando datos existentes"));
        assert!(text.contains("✅ Área creada: Ventas"));
        assert!(text.contains("⚠️  Área ya existía: Finanzas"));
        assert!(text.contains("✅ Cargo creado: Asesor Comercial (Ventas)"));
        assert!(text.contains("Áreas creadas: 1"));
        assert!(text.contains("Cargos creados: 1"));
        assert!(text.contains("Tecnología: 7 cargos (Tecnología-0, Tecnología-1, Tecnología-2, …)"));
        assert!(text.contains("Total eventos: 0"));
    }
}
