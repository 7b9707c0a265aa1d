use super::defaults::diamond_ranges;
use crate::{Facet, FacetMut, FacetRef, RangeBounds, Selection, Subtype};

/// Facets of the diamond listing (single stones and melee parcels)
#[derive(Debug, Clone, PartialEq)]
pub struct DiamondFilters {
    pub subtype: Subtype,

    pub shape: Selection,
    pub color: Selection,
    pub clarity: Selection,
    pub cut: Selection,
    pub polish: Selection,
    pub symmetry: Selection,
    pub fluorescence: Selection,
    pub lab: Selection,
    pub origin: Selection,

    pub carat_weight: RangeBounds,
    pub price: RangeBounds,
    pub table: RangeBounds,
    pub depth: RangeBounds,

    pub search: String,
    pub report_number: String,
    pub stock_number: String,
    pub company_name: String,
}

impl DiamondFilters {
    pub fn defaults(subtype: Subtype) -> Self {
        let ranges = diamond_ranges(subtype);
        Self {
            subtype,
            shape: Selection::new(),
            color: Selection::new(),
            clarity: Selection::new(),
            cut: Selection::new(),
            polish: Selection::new(),
            symmetry: Selection::new(),
            fluorescence: Selection::new(),
            lab: Selection::new(),
            origin: Selection::new(),
            carat_weight: ranges.carat_weight,
            price: ranges.price,
            table: ranges.table,
            depth: ranges.depth,
            search: String::new(),
            report_number: String::new(),
            stock_number: String::new(),
            company_name: String::new(),
        }
    }

    pub(crate) fn facets(&self) -> Vec<(Facet, FacetRef<'_>)> {
        let ranges = diamond_ranges(self.subtype);
        vec![
            (Facet::Shape, FacetRef::Multi(&self.shape)),
            (Facet::Color, FacetRef::Multi(&self.color)),
            (Facet::Clarity, FacetRef::Multi(&self.clarity)),
            (Facet::Cut, FacetRef::Multi(&self.cut)),
            (Facet::Polish, FacetRef::Multi(&self.polish)),
            (Facet::Symmetry, FacetRef::Multi(&self.symmetry)),
            (Facet::Fluorescence, FacetRef::Multi(&self.fluorescence)),
            (Facet::Lab, FacetRef::Multi(&self.lab)),
            (Facet::Origin, FacetRef::Multi(&self.origin)),
            (
                Facet::CaratWeight,
                FacetRef::Range {
                    value: &self.carat_weight,
                    default: ranges.carat_weight,
                },
            ),
            (
                Facet::Price,
                FacetRef::Range {
                    value: &self.price,
                    default: ranges.price,
                },
            ),
            (
                Facet::Table,
                FacetRef::Range {
                    value: &self.table,
                    default: ranges.table,
                },
            ),
            (
                Facet::Depth,
                FacetRef::Range {
                    value: &self.depth,
                    default: ranges.depth,
                },
            ),
            (Facet::Search, FacetRef::Text(&self.search)),
            (Facet::ReportNumber, FacetRef::Text(&self.report_number)),
            (Facet::StockNumber, FacetRef::Text(&self.stock_number)),
            (Facet::CompanyName, FacetRef::Text(&self.company_name)),
        ]
    }

    pub(crate) fn facet_mut(&mut self, facet: Facet) -> Option<FacetMut<'_>> {
        let ranges = diamond_ranges(self.subtype);
        let view = match facet {
            Facet::Shape => FacetMut::Multi(&mut self.shape),
            Facet::Color => FacetMut::Multi(&mut self.color),
            Facet::Clarity => FacetMut::Multi(&mut self.clarity),
            Facet::Cut => FacetMut::Multi(&mut self.cut),
            Facet::Polish => FacetMut::Multi(&mut self.polish),
            Facet::Symmetry => FacetMut::Multi(&mut self.symmetry),
            Facet::Fluorescence => FacetMut::Multi(&mut self.fluorescence),
            Facet::Lab => FacetMut::Multi(&mut self.lab),
            Facet::Origin => FacetMut::Multi(&mut self.origin),
            Facet::CaratWeight => FacetMut::Range {
                value: &mut self.carat_weight,
                default: ranges.carat_weight,
            },
            Facet::Price => FacetMut::Range {
                value: &mut self.price,
                default: ranges.price,
            },
            Facet::Table => FacetMut::Range {
                value: &mut self.table,
                default: ranges.table,
            },
            Facet::Depth => FacetMut::Range {
                value: &mut self.depth,
                default: ranges.depth,
            },
            Facet::Search => FacetMut::Text(&mut self.search),
            Facet::ReportNumber => FacetMut::Text(&mut self.report_number),
            Facet::StockNumber => FacetMut::Text(&mut self.stock_number),
            Facet::CompanyName => FacetMut::Text(&mut self.company_name),
            _ => return None,
        };
        Some(view)
    }
}
