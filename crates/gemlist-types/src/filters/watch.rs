use super::defaults::watch_ranges;
use crate::{Facet, FacetMut, FacetRef, RangeBounds, Selection};

/// Facets of the watch listing
#[derive(Debug, Clone, PartialEq)]
pub struct WatchFilters {
    pub brand: Selection,
    pub movement: Selection,
    pub case_material: Selection,
    pub bracelet_material: Selection,
    pub dial_color: Selection,
    pub condition: Selection,
    pub gender: Selection,

    pub price: RangeBounds,
    pub case_size: RangeBounds,
    pub year: RangeBounds,

    pub search: String,
    pub reference_number: String,
    pub company_name: String,
}

impl Default for WatchFilters {
    fn default() -> Self {
        let ranges = watch_ranges();
        Self {
            brand: Selection::new(),
            movement: Selection::new(),
            case_material: Selection::new(),
            bracelet_material: Selection::new(),
            dial_color: Selection::new(),
            condition: Selection::new(),
            gender: Selection::new(),
            price: ranges.price,
            case_size: ranges.case_size,
            year: ranges.year,
            search: String::new(),
            reference_number: String::new(),
            company_name: String::new(),
        }
    }
}

impl WatchFilters {
    pub(crate) fn facets(&self) -> Vec<(Facet, FacetRef<'_>)> {
        let ranges = watch_ranges();
        vec![
            (Facet::Brand, FacetRef::Multi(&self.brand)),
            (Facet::Movement, FacetRef::Multi(&self.movement)),
            (Facet::CaseMaterial, FacetRef::Multi(&self.case_material)),
            (
                Facet::BraceletMaterial,
                FacetRef::Multi(&self.bracelet_material),
            ),
            (Facet::DialColor, FacetRef::Multi(&self.dial_color)),
            (Facet::Condition, FacetRef::Multi(&self.condition)),
            (Facet::Gender, FacetRef::Multi(&self.gender)),
            (
                Facet::Price,
                FacetRef::Range {
                    value: &self.price,
                    default: ranges.price,
                },
            ),
            (
                Facet::CaseSize,
                FacetRef::Range {
                    value: &self.case_size,
                    default: ranges.case_size,
                },
            ),
            (
                Facet::Year,
                FacetRef::Range {
                    value: &self.year,
                    default: ranges.year,
                },
            ),
            (Facet::Search, FacetRef::Text(&self.search)),
            (
                Facet::ReferenceNumber,
                FacetRef::Text(&self.reference_number),
            ),
            (Facet::CompanyName, FacetRef::Text(&self.company_name)),
        ]
    }

    pub(crate) fn facet_mut(&mut self, facet: Facet) -> Option<FacetMut<'_>> {
        let ranges = watch_ranges();
        let view = match facet {
            Facet::Brand => FacetMut::Multi(&mut self.brand),
            Facet::Movement => FacetMut::Multi(&mut self.movement),
            Facet::CaseMaterial => FacetMut::Multi(&mut self.case_material),
            Facet::BraceletMaterial => FacetMut::Multi(&mut self.bracelet_material),
            Facet::DialColor => FacetMut::Multi(&mut self.dial_color),
            Facet::Condition => FacetMut::Multi(&mut self.condition),
            Facet::Gender => FacetMut::Multi(&mut self.gender),
            Facet::Price => FacetMut::Range {
                value: &mut self.price,
                default: ranges.price,
            },
            Facet::CaseSize => FacetMut::Range {
                value: &mut self.case_size,
                default: ranges.case_size,
            },
            Facet::Year => FacetMut::Range {
                value: &mut self.year,
                default: ranges.year,
            },
            Facet::Search => FacetMut::Text(&mut self.search),
            Facet::ReferenceNumber => FacetMut::Text(&mut self.reference_number),
            Facet::CompanyName => FacetMut::Text(&mut self.company_name),
            _ => return None,
        };
        Some(view)
    }
}
