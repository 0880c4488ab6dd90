use crate::model::{CoverageKind, RenderedEntry};

/// Décide si les entrées résolues d'une fenêtre étroite sont un tour normal ou un override.
pub trait OverrideClassifier {
    fn classify(&self, resolved: &[RenderedEntry]) -> CoverageKind;
}

/// Heuristique par défaut : la fenêtre couvre exactement un tour de rotation.
///
/// Une seule entrée résolue => tour normal. Plusieurs entrées => le tour a été
/// découpé par un override et tous les fragments comptent comme override.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitTurnClassifier;

impl OverrideClassifier for SplitTurnClassifier {
    fn classify(&self, resolved: &[RenderedEntry]) -> CoverageKind {
        if resolved.len() > 1 {
            CoverageKind::Override
        } else {
            CoverageKind::Normal
        }
    }
}

impl<F> OverrideClassifier for F
where
    F: Fn(&[RenderedEntry]) -> CoverageKind,
{
    fn classify(&self, resolved: &[RenderedEntry]) -> CoverageKind {
        self(resolved)
    }
}
