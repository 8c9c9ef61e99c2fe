use crate::math::matrix::{Matrix, MatrixView};

/// XOR truth table, one `a, b, a ^ b` row per case.
const XOR_ROWS: [f64; 12] = [
    0.0, 0.0, 0.0,
    0.0, 1.0, 1.0,
    1.0, 0.0, 1.0,
    1.0, 1.0, 0.0,
];

/// The 4x3 XOR table: two input columns followed by the target column.
pub fn xor_table() -> Matrix {
    Matrix::from_vec(4, 3, XOR_ROWS.to_vec())
}

/// Splits an interleaved table into an input view (the first `input_cols`
/// columns) and a target view (the rest). Both views share `table`'s buffer.
pub fn split_columns<S: AsRef<[f64]>>(
    table: &Matrix<S>,
    input_cols: usize,
) -> (MatrixView<'_>, MatrixView<'_>) {
    (
        table.columns(0, input_cols),
        table.columns(input_cols, table.cols - input_cols),
    )
}
