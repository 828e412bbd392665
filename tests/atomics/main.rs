/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/


mod aggregate_tests;
mod concurrent_tests;
mod float_ops_tests;
mod pointer_ops_tests;
mod registry_tests;
mod via_tests;
