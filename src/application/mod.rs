// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal:
// generate data, train the autoencoder, report the curves.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing of results here (that's Layer 1)
//   - Only workflow coordination

// The training workflow
pub mod train_use_case;
