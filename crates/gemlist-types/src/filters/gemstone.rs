use super::defaults::gemstone_ranges;
use crate::{Facet, FacetMut, FacetRef, RangeBounds, Selection, Subtype};

/// Facets of the coloured gemstone listing
#[derive(Debug, Clone, PartialEq)]
pub struct GemstoneFilters {
    pub subtype: Subtype,

    pub gem_type: Selection,
    pub shape: Selection,
    pub color: Selection,
    pub clarity: Selection,
    pub origin: Selection,
    pub treatment: Selection,
    pub lab: Selection,

    pub carat_weight: RangeBounds,
    pub price: RangeBounds,

    pub search: String,
    pub report_number: String,
    pub stock_number: String,
    pub company_name: String,
}

impl GemstoneFilters {
    pub fn defaults(subtype: Subtype) -> Self {
        let ranges = gemstone_ranges(subtype);
        Self {
            subtype,
            gem_type: Selection::new(),
            shape: Selection::new(),
            color: Selection::new(),
            clarity: Selection::new(),
            origin: Selection::new(),
            treatment: Selection::new(),
            lab: Selection::new(),
            carat_weight: ranges.carat_weight,
            price: ranges.price,
            search: String::new(),
            report_number: String::new(),
            stock_number: String::new(),
            company_name: String::new(),
        }
    }

    pub(crate) fn facets(&self) -> Vec<(Facet, FacetRef<'_>)> {
        let ranges = gemstone_ranges(self.subtype);
        vec![
            (Facet::GemType, FacetRef::Multi(&self.gem_type)),
            (Facet::Shape, FacetRef::Multi(&self.shape)),
            (Facet::Color, FacetRef::Multi(&self.color)),
            (Facet::Clarity, FacetRef::Multi(&self.clarity)),
            (Facet::Origin, FacetRef::Multi(&self.origin)),
            (Facet::Treatment, FacetRef::Multi(&self.treatment)),
            (Facet::Lab, FacetRef::Multi(&self.lab)),
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
            (Facet::Search, FacetRef::Text(&self.search)),
            (Facet::ReportNumber, FacetRef::Text(&self.report_number)),
            (Facet::StockNumber, FacetRef::Text(&self.stock_number)),
            (Facet::CompanyName, FacetRef::Text(&self.company_name)),
        ]
    }

    pub(crate) fn facet_mut(&mut self, facet: Facet) -> Option<FacetMut<'_>> {
        let ranges = gemstone_ranges(self.subtype);
        let view = match facet {
            Facet::GemType => FacetMut::Multi(&mut self.gem_type),
            Facet::Shape => FacetMut::Multi(&mut self.shape),
            Facet::Color => FacetMut::Multi(&mut self.color),
            Facet::Clarity => FacetMut::Multi(&mut self.clarity),
            Facet::Origin => FacetMut::Multi(&mut self.origin),
            Facet::Treatment => FacetMut::Multi(&mut self.treatment),
            Facet::Lab => FacetMut::Multi(&mut self.lab),
            Facet::CaratWeight => FacetMut::Range {
                value: &mut self.carat_weight,
                default: ranges.carat_weight,
            },
            Facet::Price => FacetMut::Range {
                value: &mut self.price,
                default: ranges.price,
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
