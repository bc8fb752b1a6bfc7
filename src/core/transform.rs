use crate::domain::model::{
    Dataset, IntegrityReport, MissingValue, TransformRules, TransformedDataset, TransformedRecord,
};

/// Keeps rows whose `valor` exceeds `rules.min_value` and derives
/// `valor_com_desconto`. Rows without a `valor` are dropped. Input order is kept.
pub fn apply_discount(data: Dataset, rules: TransformRules) -> TransformedDataset {
    data.into_iter()
        .filter_map(|record| {
            let valor = record.valor.filter(|v| *v > rules.min_value)?;
            Some(TransformedRecord {
                id: record.id,
                valor,
                data: record.data,
                valor_com_desconto: valor * rules.discount_factor,
            })
        })
        .collect()
}

/// Lists every absent or non-finite field, by row index.
pub fn find_missing_values(data: &TransformedDataset) -> IntegrityReport {
    let mut missing = Vec::new();

    for (row, record) in data.iter().enumerate() {
        if record.id.is_none() {
            missing.push(MissingValue { row, field: "id" });
        }
        if !record.valor.is_finite() {
            missing.push(MissingValue { row, field: "valor" });
        }
        if record.data.is_none() {
            missing.push(MissingValue { row, field: "data" });
        }
        if !record.valor_com_desconto.is_finite() {
            missing.push(MissingValue {
                row,
                field: "valor_com_desconto",
            });
        }
    }

    IntegrityReport {
        rows_checked: data.len(),
        missing,
    }
}
